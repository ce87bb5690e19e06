use error_stack::{report, ResultExt};
use tracing::instrument;

use crate::ports::presentation_service::{
    PredefinedLayout, PresentationService, PresentationServiceError, SlideRequest,
};

pub const FILLER_LABEL: &str = "Filler";

/// Adds `count` title slides labelled [`FILLER_LABEL`] so players cannot
/// guess how many songs are left from the slide counter.
#[instrument(skip(service))]
pub async fn add_filler_slides(
    service: &dyn PresentationService,
    presentation_id: &str,
    count: u32,
    insertion_index: Option<u32>,
) -> error_stack::Result<(), PresentationServiceError> {
    if count == 0 {
        return Ok(());
    }

    let requests = (0..count)
        .map(|_| SlideRequest::CreateSlide {
            layout: PredefinedLayout::Title,
            insertion_index,
        })
        .collect();
    service.batch_update(presentation_id, requests).await?;

    let presentation = service.get_presentation(presentation_id).await?;
    let start = match insertion_index {
        Some(index) => index as usize,
        None => presentation.slides.len().saturating_sub(count as usize),
    };

    let mut requests = Vec::with_capacity(2 * count as usize);
    for slide in presentation.slides.iter().skip(start).take(count as usize) {
        let [title, subtitle, ..] = slide.element_ids.as_slice() else {
            return Err(report!(PresentationServiceError::MissingField(
                "title slide placeholders"
            )))
            .attach_printable(format!("Slide: {}", slide.object_id));
        };

        requests.push(SlideRequest::InsertText {
            object_id: title.clone(),
            text: FILLER_LABEL.to_owned(),
        });
        requests.push(SlideRequest::DeleteObject {
            object_id: subtitle.clone(),
        });
    }

    service.batch_update(presentation_id, requests).await?;
    tracing::debug!("Added {} filler slides", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::FakePresentationService;

    #[tokio::test]
    async fn test_zero_fillers_is_noop() {
        let service = FakePresentationService::default();
        let id = service.create_presentation("quiz").await.unwrap();

        add_filler_slides(&service, &id, 0, None).await.unwrap();

        assert!(service.batches().is_empty());
    }

    #[tokio::test]
    async fn test_fillers_get_label_and_lose_subtitle() {
        let service = FakePresentationService::default();
        let id = service.create_presentation("quiz").await.unwrap();

        add_filler_slides(&service, &id, 2, None).await.unwrap();

        let deck = service.get_presentation(&id).await.unwrap();
        // default slide plus two fillers
        assert_eq!(deck.slides.len(), 3);
        for slide in &deck.slides[1..] {
            assert_eq!(slide.element_ids.len(), 1);
            assert_eq!(
                service.text_of(&slide.element_ids[0]).as_deref(),
                Some(FILLER_LABEL)
            );
        }
    }

    #[tokio::test]
    async fn test_fillers_at_insertion_index() {
        let service = FakePresentationService::default();
        let id = service.create_presentation("quiz").await.unwrap();

        add_filler_slides(&service, &id, 1, Some(0)).await.unwrap();

        let deck = service.get_presentation(&id).await.unwrap();
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].element_ids.len(), 1);
        assert_eq!(
            service.text_of(&deck.slides[0].element_ids[0]).as_deref(),
            Some(FILLER_LABEL)
        );
    }
}
