use std::sync::Arc;

use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use crate::{
    application::{filler_slides::add_filler_slides, video_grid::VideoGridSlideBuilder},
    domain::video_url::VideoParams,
    ports::{
        presentation_service::{PresentationService, SlideRequest},
        routine::{Routine, RoutineError},
    },
};

#[derive(Error, Debug)]
enum PresentationRoutineError {
    #[error("failed to execute presentation operation")]
    PresentationError,
    #[error("new presentation has no default slide")]
    MissingDefaultSlide,
}

pub fn presentation_url(presentation_id: &str) -> String {
    format!("https://docs.google.com/presentation/d/{}", presentation_id)
}

/// Builds the quiz deck: optional filler slides followed by the video grid.
pub struct PresentationRoutine {
    service: Arc<dyn PresentationService>,
    title: String,
    fillers: u32,
    grid: VideoGridSlideBuilder,
    videos: Arc<[VideoParams]>,
}

impl std::fmt::Debug for PresentationRoutine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationRoutine")
            .field("title", &self.title)
            .field("fillers", &self.fillers)
            .field("grid", &self.grid)
            .field("videos", &self.videos.len())
            .finish()
    }
}

impl PresentationRoutine {
    pub fn new(
        service: Arc<dyn PresentationService>,
        title: String,
        fillers: u32,
        grid: VideoGridSlideBuilder,
        videos: Arc<[VideoParams]>,
    ) -> Self {
        Self {
            service,
            title,
            fillers,
            grid,
            videos,
        }
    }

    /// Creates an empty presentation; new presentations come with one slide.
    #[instrument]
    async fn create_empty_presentation(
        &self,
    ) -> error_stack::Result<String, PresentationRoutineError> {
        let presentation_id = self
            .service
            .create_presentation(&self.title)
            .await
            .change_context(PresentationRoutineError::PresentationError)?;

        let presentation = self
            .service
            .get_presentation(&presentation_id)
            .await
            .change_context(PresentationRoutineError::PresentationError)?;
        let default_slide = presentation
            .slides
            .first()
            .ok_or(report!(PresentationRoutineError::MissingDefaultSlide))?;

        self.service
            .batch_update(
                &presentation_id,
                vec![SlideRequest::DeleteObject {
                    object_id: default_slide.object_id.clone(),
                }],
            )
            .await
            .change_context(PresentationRoutineError::PresentationError)?;

        Ok(presentation_id)
    }
}

#[async_trait::async_trait]
impl Routine for PresentationRoutine {
    fn name(&self) -> &'static str {
        "PresentationRoutine"
    }

    #[instrument(skip(self), name = "PresentationRoutine::run")]
    async fn run(&self) -> error_stack::Result<(), RoutineError> {
        tracing::info!("Presentation: 🖼️  Creating presentation '{}'", self.title);
        let presentation_id = self.create_empty_presentation().await.change_context(
            RoutineError::routine_failure("Failed to create presentation"),
        )?;

        if self.fillers > 0 {
            tracing::info!("Presentation: 🙈 Adding {} filler slides", self.fillers);
        }
        add_filler_slides(self.service.as_ref(), &presentation_id, self.fillers, None)
            .await
            .change_context(RoutineError::routine_failure("Failed to add filler slides"))?;

        tracing::info!("Presentation: 🎬 Embedding {} videos", self.videos.len());
        let slides = self
            .grid
            .build(self.service.as_ref(), &presentation_id, &self.videos, None)
            .await
            .change_context(RoutineError::routine_failure("Failed to build video slides"))?;
        tracing::debug!("Created {} video slides", slides);

        tracing::info!("Presentation URL: {}", presentation_url(&presentation_id));
        Ok(())
    }
}
