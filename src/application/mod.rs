#[cfg(test)]
pub mod fakes;
pub mod filler_slides;
pub mod playlist_routine;
pub mod presentation_routine;
pub mod quiz_kit;
pub mod score_sheet_routine;
pub mod video_grid;
