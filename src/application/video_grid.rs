use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use crate::{
    domain::{
        slides::grid_layout::{GridLayout, GridSpec},
        video_url::VideoParams,
    },
    ports::presentation_service::{PredefinedLayout, PresentationService, SlideRequest},
};

#[derive(Error, Debug)]
pub enum VideoGridError {
    #[error("invalid grid layout")]
    InvalidLayout,
    #[error("video cannot be trimmed as requested")]
    InvalidPlayback,
    #[error("presentation request failed")]
    PresentationError,
    #[error("expected {expected} created objects, got {actual}")]
    UnexpectedReplies { expected: usize, actual: usize },
}

/// Embeds videos on blank slides, `per_slide` at a time.
#[derive(Debug, Clone)]
pub struct VideoGridSlideBuilder {
    pub spec: GridSpec,
    /// Playback length in seconds, 0 for unlimited
    pub duration: u32,
}

impl VideoGridSlideBuilder {
    pub fn new(spec: GridSpec, duration: u32) -> Self {
        Self { spec, duration }
    }

    /// Returns the number of slides created.
    #[instrument(skip(self, service, videos), fields(videos = videos.len()))]
    pub async fn build(
        &self,
        service: &dyn PresentationService,
        presentation_id: &str,
        videos: &[VideoParams],
        insertion_index: Option<u32>,
    ) -> error_stack::Result<usize, VideoGridError> {
        self.spec
            .validate()
            .change_context(VideoGridError::InvalidLayout)?;
        let bounds = videos
            .iter()
            .map(|video| video.playback_bounds(self.duration))
            .collect::<error_stack::Result<Vec<_>, _>>()
            .change_context(VideoGridError::InvalidPlayback)?;

        let slide_count = self.spec.slide_count(videos.len());
        if slide_count == 0 {
            return Ok(0);
        }

        let requests = (0..slide_count)
            .map(|_| SlideRequest::CreateSlide {
                layout: PredefinedLayout::Blank,
                insertion_index,
            })
            .collect();
        let slide_ids = created_ids(
            service
                .batch_update(presentation_id, requests)
                .await
                .change_context(VideoGridError::PresentationError)?,
            slide_count,
        )?;

        let presentation = service
            .get_presentation(presentation_id)
            .await
            .change_context(VideoGridError::PresentationError)?;
        let page = presentation.page_size;
        let layout =
            GridLayout::new(&self.spec, &page).change_context(VideoGridError::InvalidLayout)?;

        let requests = videos
            .iter()
            .enumerate()
            .map(|(index, video)| {
                let placement = layout.placement(index);
                SlideRequest::CreateVideo {
                    video_id: video.video_id.clone(),
                    page_object_id: slide_ids[placement.slide_index].clone(),
                    frame: placement.frame,
                    unit: page.unit.clone(),
                }
            })
            .collect();
        let video_object_ids = created_ids(
            service
                .batch_update(presentation_id, requests)
                .await
                .change_context(VideoGridError::PresentationError)?,
            videos.len(),
        )?;

        let trims: Vec<SlideRequest> = bounds
            .into_iter()
            .zip(video_object_ids)
            .filter_map(|(bounds, object_id)| {
                bounds.map(|bounds| SlideRequest::UpdateVideoProperties { object_id, bounds })
            })
            .collect();

        if !trims.is_empty() {
            tracing::debug!("Trimming {} videos", trims.len());
            service
                .batch_update(presentation_id, trims)
                .await
                .change_context(VideoGridError::PresentationError)?;
        }

        Ok(slide_count)
    }
}

fn created_ids(
    replies: Vec<Option<String>>,
    expected: usize,
) -> error_stack::Result<Vec<String>, VideoGridError> {
    let ids: Vec<String> = replies.into_iter().flatten().collect();
    if ids.len() != expected {
        return Err(report!(VideoGridError::UnexpectedReplies {
            expected,
            actual: ids.len(),
        }));
    }
    Ok(ids)
}
