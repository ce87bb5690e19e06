pub mod app_config;
pub mod google_config;
pub mod layout_config;
pub mod logging_config;
pub mod playlist_config;
