pub mod entry;
pub mod sheets;
pub mod slides;
pub mod video_url;
