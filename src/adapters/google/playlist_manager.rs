use error_stack::{report, ResultExt};
use google_youtube3::{
    api::{
        Playlist, PlaylistItem, PlaylistItemSnippet, PlaylistSnippet, PlaylistStatus, ResourceId,
        Scope,
    },
    YouTube,
};
use tracing::instrument;

use crate::ports::playlist_service::{NewPlaylist, PlaylistService, PlaylistServiceError};

use super::{
    auth::GoogleAuthenticator,
    http_client::{HttpClient, HttpsConnector},
};

pub struct PlaylistManager {
    hub: YouTube<HttpsConnector>,
}

impl std::fmt::Debug for PlaylistManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlaylistManager")
    }
}

impl PlaylistManager {
    pub fn new(client: HttpClient, auth: GoogleAuthenticator) -> Self {
        Self {
            hub: YouTube::new(client, auth),
        }
    }
}

fn to_api_playlist(playlist: &NewPlaylist) -> Playlist {
    Playlist {
        snippet: Some(PlaylistSnippet {
            title: Some(playlist.title.clone()),
            description: playlist.description.clone(),
            ..Default::default()
        }),
        status: Some(PlaylistStatus {
            privacy_status: Some(playlist.privacy_status.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn to_api_item(playlist_id: &str, video_id: &str) -> PlaylistItem {
    PlaylistItem {
        snippet: Some(PlaylistItemSnippet {
            playlist_id: Some(playlist_id.to_owned()),
            resource_id: Some(ResourceId {
                kind: Some("youtube#video".to_owned()),
                video_id: Some(video_id.to_owned()),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[async_trait::async_trait]
impl PlaylistService for PlaylistManager {
    #[instrument]
    async fn create_playlist(
        &self,
        playlist: &NewPlaylist,
    ) -> error_stack::Result<String, PlaylistServiceError> {
        let (_, created) = self
            .hub
            .playlists()
            .insert(to_api_playlist(playlist))
            .add_part("snippet")
            .add_part("status")
            .add_scope(Scope::ForceSsl)
            .doit()
            .await
            .change_context(PlaylistServiceError::FailedToCreatePlaylist)?;

        created
            .id
            .ok_or(report!(PlaylistServiceError::MissingField("playlist id")))
    }

    #[instrument]
    async fn insert_video(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> error_stack::Result<(), PlaylistServiceError> {
        self.hub
            .playlist_items()
            .insert(to_api_item(playlist_id, video_id))
            .add_part("snippet")
            .add_scope(Scope::ForceSsl)
            .doit()
            .await
            .change_context(PlaylistServiceError::FailedToInsertVideo(
                video_id.to_owned(),
            ))
            .attach_printable_lazy(|| format!("Playlist: {}", playlist_id))?;

        Ok(())
    }
}
