use std::path::Path;

use error_stack::{report, ResultExt};
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum EntryError {
    #[error("failed to read entries file")]
    ReadError,
    #[error("line {line}: expected at least a player and a url")]
    MissingField { line: u64 },
    #[error("entries file has no rows")]
    Empty,
}

/// One song of the quiz: who picked it and where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub player: String,
    pub url: String,
    /// Trailing CSV columns, kept but unused
    pub extra: Vec<String>,
}

impl Entry {
    pub fn new(player: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            url: url.into(),
            extra: Vec::new(),
        }
    }
}

/// Reads `player,url[,...]` rows from a headerless CSV file.
#[instrument]
pub fn load_entries(path: &Path) -> error_stack::Result<Vec<Entry>, EntryError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .change_context(EntryError::ReadError)
        .attach_printable_lazy(|| format!("Path: {}", path.display()))?;

    read_entries(reader)
}

fn read_entries<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> error_stack::Result<Vec<Entry>, EntryError> {
    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.change_context(EntryError::ReadError)?;
        let line = record.position().map_or(0, |position| position.line());

        let mut fields = record.iter().map(str::to_owned);
        let (Some(player), Some(url)) = (fields.next(), fields.next()) else {
            return Err(report!(EntryError::MissingField { line }));
        };

        entries.push(Entry {
            player,
            url,
            extra: fields.collect(),
        });
    }

    if entries.is_empty() {
        return Err(report!(EntryError::Empty));
    }

    tracing::debug!("Loaded {} entries", entries.len());
    Ok(entries)
}

pub fn shuffle_entries(entries: &mut [Entry]) {
    entries.shuffle(&mut rand::thread_rng());
}
