use std::sync::Arc;

use error_stack::ResultExt;
use tracing::{instrument, Instrument};

use crate::{
    application::{
        playlist_routine::PlaylistRoutine, presentation_routine::PresentationRoutine,
        score_sheet_routine::ScoreSheetRoutine, video_grid::VideoGridSlideBuilder,
    },
    domain::{
        entry::Entry,
        video_url::{VideoParams, VideoUrlError},
    },
    ports::{
        playlist_service::{NewPlaylist, PlaylistService, PrivacyStatus},
        presentation_service::PresentationService,
        routine::{Routine, RoutineError},
        spreadsheet_service::SpreadsheetService,
    },
};

/// Remote collaborators shared by the routines
#[derive(Clone)]
pub struct QuizServices {
    pub presentations: Arc<dyn PresentationService>,
    pub spreadsheets: Arc<dyn SpreadsheetService>,
    pub playlists: Arc<dyn PlaylistService>,
}

/// Everything one run produces artifacts from.
#[derive(Debug, Clone)]
pub struct QuizPlan {
    pub name: String,
    pub host: Option<String>,
    pub fillers: u32,
    pub grid: VideoGridSlideBuilder,
    pub entries: Arc<[Entry]>,
    pub videos: Arc<[VideoParams]>,
    pub playlist_description: Option<String>,
    pub privacy_status: PrivacyStatus,
}

/// Parses every entry's url and checks its playback bounds for `duration`,
/// naming the first offending row.
pub fn parse_videos(
    entries: &[Entry],
    duration: u32,
) -> error_stack::Result<Vec<VideoParams>, VideoUrlError> {
    let parse = |entry: &Entry| -> error_stack::Result<VideoParams, VideoUrlError> {
        let video = VideoParams::from_url(&entry.url)?;
        video.playback_bounds(duration)?;
        Ok(video)
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            parse(entry).attach_printable_lazy(|| {
                format!("Entry {} ({}): {}", index + 1, entry.player, entry.url)
            })
        })
        .collect()
}

impl QuizPlan {
    /// Deck, score sheet and playlist, in the order they are built
    pub fn routines(&self, services: &QuizServices) -> Vec<Box<dyn Routine>> {
        let video_ids: Arc<[String]> = self
            .videos
            .iter()
            .map(|video| video.video_id.clone())
            .collect();

        vec![
            Box::new(PresentationRoutine::new(
                Arc::clone(&services.presentations),
                self.name.clone(),
                self.fillers,
                self.grid.clone(),
                Arc::clone(&self.videos),
            )),
            Box::new(ScoreSheetRoutine::new(
                Arc::clone(&services.spreadsheets),
                self.name.clone(),
                Arc::clone(&self.entries),
                self.host.clone(),
            )),
            Box::new(PlaylistRoutine::new(
                Arc::clone(&services.playlists),
                NewPlaylist {
                    title: self.name.clone(),
                    description: self.playlist_description.clone(),
                    privacy_status: self.privacy_status,
                },
                video_ids,
            )),
        ]
    }
}

/// Runs the routines one after the other, stopping at the first failure.
///
/// Artifacts created by earlier routines are left in place.
#[instrument(skip(routines), fields(routines = routines.len()))]
pub async fn run_routines(routines: &[Box<dyn Routine>]) -> error_stack::Result<(), RoutineError> {
    for (index, routine) in routines.iter().enumerate() {
        let result = routine
            .run()
            .instrument(tracing::span!(
                tracing::Level::INFO,
                "routine",
                routine = routine.name(),
                index = index,
                len = routines.len()
            ))
            .await;

        match result {
            Ok(()) => tracing::info!("✅ {}: OK", routine.name()),
            Err(report) => {
                tracing::error!("❌ {}: failed", routine.name());
                return Err(report).attach_printable_lazy(|| {
                    format!(
                        "{} of {} routines completed before {} failed",
                        index,
                        routines.len(),
                        routine.name()
                    )
                });
            }
        }
    }

    Ok(())
}
