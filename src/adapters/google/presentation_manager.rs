use error_stack::{report, ResultExt};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::{
    domain::slides::grid_layout::PageSize,
    ports::presentation_service::{
        PresentationService, PresentationServiceError, PresentationSnapshot, SlideRequest,
        SlideSummary,
    },
};

use super::{
    auth::{GoogleAuthenticator, PRESENTATIONS_SCOPE},
    slides_api::{
        AffineTransform, BatchUpdateRequest, BatchUpdateResponse, CreateSlide, CreateVideo,
        DeleteObject, Dimension, ElementProperties, InsertText, LayoutReference,
        NewPresentation, Presentation, Reply, Request, Size, UpdateVideoProperties,
        VideoProperties, PRESENTATIONS_ENDPOINT,
    },
};

/// Slides adapter over the REST API, authorized with the shared OAuth
/// authenticator.
pub struct PresentationManager {
    client: Client,
    auth: GoogleAuthenticator,
}

impl std::fmt::Debug for PresentationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PresentationManager")
    }
}

impl PresentationManager {
    pub fn new(client: Client, auth: GoogleAuthenticator) -> Self {
        Self { client, auth }
    }

    async fn bearer_token(&self) -> error_stack::Result<String, PresentationServiceError> {
        let token = self
            .auth
            .token(&[PRESENTATIONS_SCOPE])
            .await
            .change_context(PresentationServiceError::FailedToAuthorize)?;

        token
            .token()
            .map(str::to_owned)
            .ok_or(report!(PresentationServiceError::FailedToAuthorize))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> error_stack::Result<reqwest::Result<T>, PresentationServiceError> {
        let token = self.bearer_token().await?;
        Ok(send_json(request.bearer_auth(token)).await)
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> reqwest::Result<T> {
    request.send().await?.error_for_status()?.json().await
}

fn dimension(magnitude: f64, unit: &str) -> Dimension {
    Dimension {
        magnitude,
        unit: Some(unit.to_owned()),
    }
}

fn to_api_request(request: SlideRequest) -> Request {
    match request {
        SlideRequest::CreateSlide {
            layout,
            insertion_index,
        } => Request::CreateSlide(CreateSlide {
            insertion_index,
            slide_layout_reference: LayoutReference {
                predefined_layout: layout.to_string(),
            },
        }),
        SlideRequest::InsertText { object_id, text } => {
            Request::InsertText(InsertText { object_id, text })
        }
        SlideRequest::DeleteObject { object_id } => {
            Request::DeleteObject(DeleteObject { object_id })
        }
        SlideRequest::CreateVideo {
            video_id,
            page_object_id,
            frame,
            unit,
        } => Request::CreateVideo(CreateVideo {
            source: "YOUTUBE",
            id: video_id,
            element_properties: ElementProperties {
                page_object_id,
                size: Size {
                    width: dimension(frame.width, &unit),
                    height: dimension(frame.height, &unit),
                },
                transform: AffineTransform {
                    scale_x: 1.0,
                    scale_y: 1.0,
                    translate_x: frame.x,
                    translate_y: frame.y,
                    unit,
                },
            },
        }),
        SlideRequest::UpdateVideoProperties { object_id, bounds } => {
            Request::UpdateVideoProperties(UpdateVideoProperties {
                object_id,
                video_properties: VideoProperties {
                    start: bounds.start,
                    end: bounds.end,
                },
                fields: "*",
            })
        }
    }
}

fn created_object_id(reply: Reply) -> Option<String> {
    reply
        .create_slide
        .and_then(|created| created.object_id)
        .or_else(|| reply.create_video.and_then(|created| created.object_id))
}

fn to_snapshot(
    presentation: Presentation,
) -> error_stack::Result<PresentationSnapshot, PresentationServiceError> {
    let page_size = presentation
        .page_size
        .ok_or(report!(PresentationServiceError::MissingField("page size")))?;

    let slides = presentation
        .slides
        .into_iter()
        .map(|page| {
            Ok(SlideSummary {
                object_id: page
                    .object_id
                    .ok_or(report!(PresentationServiceError::MissingField("slide id")))?,
                element_ids: page
                    .page_elements
                    .into_iter()
                    .filter_map(|element| element.object_id)
                    .collect(),
            })
        })
        .collect::<error_stack::Result<_, _>>()?;

    Ok(PresentationSnapshot {
        page_size: PageSize {
            width: page_size.width.magnitude,
            height: page_size.height.magnitude,
            unit: page_size.width.unit.unwrap_or_else(|| "EMU".to_owned()),
        },
        slides,
    })
}

#[async_trait::async_trait]
impl PresentationService for PresentationManager {
    #[instrument]
    async fn create_presentation(
        &self,
        title: &str,
    ) -> error_stack::Result<String, PresentationServiceError> {
        let request = self
            .client
            .post(PRESENTATIONS_ENDPOINT)
            .json(&NewPresentation { title });

        let presentation: Presentation = self
            .send(request)
            .await?
            .change_context(PresentationServiceError::FailedToCreatePresentation)?;

        presentation
            .presentation_id
            .ok_or(report!(PresentationServiceError::MissingField(
                "presentation id"
            )))
    }

    #[instrument]
    async fn get_presentation(
        &self,
        presentation_id: &str,
    ) -> error_stack::Result<PresentationSnapshot, PresentationServiceError> {
        let request = self
            .client
            .get(format!("{}/{}", PRESENTATIONS_ENDPOINT, presentation_id));

        let presentation: Presentation = self
            .send(request)
            .await?
            .change_context(PresentationServiceError::FailedToFetchPresentation)
            .attach_printable_lazy(|| format!("Presentation: {}", presentation_id))?;

        to_snapshot(presentation)
    }

    #[instrument(skip(requests), fields(requests = requests.len()))]
    async fn batch_update(
        &self,
        presentation_id: &str,
        requests: Vec<SlideRequest>,
    ) -> error_stack::Result<Vec<Option<String>>, PresentationServiceError> {
        let body = BatchUpdateRequest {
            requests: requests.into_iter().map(to_api_request).collect(),
        };
        let request = self
            .client
            .post(format!(
                "{}/{}:batchUpdate",
                PRESENTATIONS_ENDPOINT, presentation_id
            ))
            .json(&body);

        let response: BatchUpdateResponse = self
            .send(request)
            .await?
            .change_context(PresentationServiceError::FailedToUpdatePresentation)
            .attach_printable_lazy(|| format!("Presentation: {}", presentation_id))?;

        Ok(response
            .replies
            .into_iter()
            .map(created_object_id)
            .collect())
    }
}
