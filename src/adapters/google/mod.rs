pub mod auth;
pub mod http_client;
pub mod playlist_manager;
pub mod presentation_manager;
pub mod slides_api;
pub mod spreadsheet_manager;
pub mod value_range_factory;
