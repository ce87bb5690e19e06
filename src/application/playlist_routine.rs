use std::sync::Arc;

use error_stack::ResultExt;
use indicatif::ProgressStyle;
use thiserror::Error;
use tracing::{instrument, Instrument, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::ports::{
    playlist_service::{NewPlaylist, PlaylistService},
    routine::{Routine, RoutineError},
};

#[derive(Error, Debug)]
enum PlaylistRoutineError {
    #[error("failed to execute playlist operation")]
    PlaylistError,
}

pub fn playlist_url(playlist_id: &str) -> String {
    format!("https://www.youtube.com/playlist?list={}", playlist_id)
}

/// Creates the playlist and appends every video in quiz order.
pub struct PlaylistRoutine {
    service: Arc<dyn PlaylistService>,
    playlist: NewPlaylist,
    video_ids: Arc<[String]>,
}

impl std::fmt::Debug for PlaylistRoutine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistRoutine")
            .field("playlist", &self.playlist)
            .field("video_ids", &self.video_ids.len())
            .finish()
    }
}

impl PlaylistRoutine {
    pub fn new(
        service: Arc<dyn PlaylistService>,
        playlist: NewPlaylist,
        video_ids: Arc<[String]>,
    ) -> Self {
        Self {
            service,
            playlist,
            video_ids,
        }
    }

    #[instrument]
    async fn append_videos(
        &self,
        playlist_id: &str,
    ) -> error_stack::Result<(), PlaylistRoutineError> {
        let progress = tracing::info_span!("playlist_items");
        progress.pb_set_style(
            &ProgressStyle::with_template("{spinner} {wide_bar} {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        progress.pb_set_length(self.video_ids.len() as u64);

        async {
            for video_id in self.video_ids.iter() {
                self.service
                    .insert_video(playlist_id, video_id)
                    .await
                    .change_context(PlaylistRoutineError::PlaylistError)?;
                Span::current().pb_inc(1);
            }
            Ok::<(), error_stack::Report<PlaylistRoutineError>>(())
        }
        .instrument(progress)
        .await
    }
}

#[async_trait::async_trait]
impl Routine for PlaylistRoutine {
    fn name(&self) -> &'static str {
        "PlaylistRoutine"
    }

    #[instrument(skip(self), name = "PlaylistRoutine::run")]
    async fn run(&self) -> error_stack::Result<(), RoutineError> {
        tracing::info!(
            "Playlist: 🎵 Creating {} playlist '{}'",
            self.playlist.privacy_status,
            self.playlist.title
        );
        let playlist_id = self
            .service
            .create_playlist(&self.playlist)
            .await
            .change_context(RoutineError::routine_failure("Failed to create playlist"))?;

        tracing::info!("Playlist: ➕ Adding {} videos", self.video_ids.len());
        self.append_videos(&playlist_id)
            .await
            .change_context(RoutineError::routine_failure("Failed to add videos"))?;

        tracing::info!("Playlist URL: {}", playlist_url(&playlist_id));
        Ok(())
    }
}
