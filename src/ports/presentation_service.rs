use strum::{AsRefStr, Display};
use thiserror::Error;

use crate::domain::{
    slides::grid_layout::{CellFrame, PageSize},
    video_url::PlaybackBounds,
};

#[derive(Error, Debug)]
pub enum PresentationServiceError {
    #[error("failed to obtain an access token")]
    FailedToAuthorize,
    #[error("failed to create presentation")]
    FailedToCreatePresentation,
    #[error("failed to fetch presentation")]
    FailedToFetchPresentation,
    #[error("failed to update presentation")]
    FailedToUpdatePresentation,
    #[error("presentation response is missing {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PredefinedLayout {
    Blank,
    Title,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlideRequest {
    CreateSlide {
        layout: PredefinedLayout,
        /// Appends at the end when absent
        insertion_index: Option<u32>,
    },
    InsertText {
        object_id: String,
        text: String,
    },
    DeleteObject {
        object_id: String,
    },
    CreateVideo {
        video_id: String,
        page_object_id: String,
        frame: CellFrame,
        unit: String,
    },
    UpdateVideoProperties {
        object_id: String,
        bounds: PlaybackBounds,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSummary {
    pub object_id: String,
    /// Page element ids in z-order; placeholders come first on fresh slides
    pub element_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresentationSnapshot {
    pub page_size: PageSize,
    pub slides: Vec<SlideSummary>,
}

#[async_trait::async_trait]
pub trait PresentationService: Send + Sync {
    /// Returns the new presentation id
    async fn create_presentation(
        &self,
        title: &str,
    ) -> error_stack::Result<String, PresentationServiceError>;

    async fn get_presentation(
        &self,
        presentation_id: &str,
    ) -> error_stack::Result<PresentationSnapshot, PresentationServiceError>;

    /// Applies all requests atomically. Returns, per request, the id of the
    /// object it created, if any.
    async fn batch_update(
        &self,
        presentation_id: &str,
        requests: Vec<SlideRequest>,
    ) -> error_stack::Result<Vec<Option<String>>, PresentationServiceError>;
}
