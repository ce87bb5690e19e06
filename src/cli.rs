use std::path::PathBuf;

use clap::Parser;

use crate::{config::layout_config::LayoutConfig, domain::slides::grid_layout::GridSpec};

/// Builds a music quiz: a slide deck of video grids, a score spreadsheet and
/// a YouTube playlist, all from a CSV of `player,url` rows.
#[derive(Parser, Debug)]
#[command(name = "quiz-kit", version, long_about = None)]
pub struct Args {
    /// Title shared by the deck, the spreadsheet and the playlist
    #[arg(short, long)]
    pub name: String,

    /// CSV file with one `player,url` row per song
    #[arg(short, long)]
    pub urls: PathBuf,

    /// Quiz host, left out of the scoring denominator when also a player
    #[arg(long)]
    pub host: Option<String>,

    /// Seconds each video plays from its timestamp (0 plays to the end)
    #[arg(short, long, default_value_t = 0)]
    pub duration: u32,

    /// Filler slides inserted before the video grid
    #[arg(short, long, default_value_t = 0)]
    pub fillers: u32,

    #[arg(short, long)]
    pub rows: Option<u32>,

    #[arg(short, long)]
    pub cols: Option<u32>,

    /// Maximum videos per slide
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Largest share of the slide width one video may take
    #[arg(long)]
    pub width: Option<f64>,

    /// Largest share of the slide height one video may take
    #[arg(long)]
    pub height: Option<f64>,

    /// Shuffle the songs before building anything
    #[arg(short, long)]
    pub shuffle: bool,
}

impl Args {
    /// Grid from the flags, falling back to the configured layout
    pub fn grid_spec(&self, layout: &LayoutConfig) -> GridSpec {
        let defaults = GridSpec::from(layout);
        GridSpec {
            rows: self.rows.unwrap_or(defaults.rows),
            cols: self.cols.unwrap_or(defaults.cols),
            limit: self.limit.or(defaults.limit),
            width_ratio: self.width.unwrap_or(defaults.width_ratio),
            height_ratio: self.height.unwrap_or(defaults.height_ratio),
        }
    }
}
