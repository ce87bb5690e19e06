pub mod playlist_service;
pub mod presentation_service;
pub mod routine;
pub mod spreadsheet_service;
