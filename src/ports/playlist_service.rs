use serde::Deserialize;
use strum::{AsRefStr, Display};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaylistServiceError {
    #[error("failed to create playlist")]
    FailedToCreatePlaylist,
    #[error("failed to insert video {0}")]
    FailedToInsertVideo(String),
    #[error("playlist response is missing {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PrivacyStatus {
    #[default]
    Public,
    Unlisted,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlaylist {
    pub title: String,
    pub description: Option<String>,
    pub privacy_status: PrivacyStatus,
}

#[async_trait::async_trait]
pub trait PlaylistService: Send + Sync {
    /// Returns the new playlist id
    async fn create_playlist(
        &self,
        playlist: &NewPlaylist,
    ) -> error_stack::Result<String, PlaylistServiceError>;

    async fn insert_video(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> error_stack::Result<(), PlaylistServiceError>;
}
