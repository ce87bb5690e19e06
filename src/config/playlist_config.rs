use crate::ports::playlist_service::PrivacyStatus;

#[derive(serde::Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PlaylistConfig {
    pub privacy_status: PrivacyStatus,
    pub description: Option<String>,
}
