//! Wire types for the Slides REST API (`presentations.create`, `get` and
//! `batchUpdate`). Only the fields this tool reads or writes are modelled.

use serde::{Deserialize, Serialize};

pub const PRESENTATIONS_ENDPOINT: &str = "https://slides.googleapis.com/v1/presentations";

#[derive(Debug, Serialize)]
pub struct NewPresentation<'a> {
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub struct BatchUpdateRequest {
    pub requests: Vec<Request>,
}

/// Serialized as `{"createSlide": {...}}` and so on.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    CreateSlide(CreateSlide),
    InsertText(InsertText),
    DeleteObject(DeleteObject),
    CreateVideo(CreateVideo),
    UpdateVideoProperties(UpdateVideoProperties),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlide {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_index: Option<u32>,
    pub slide_layout_reference: LayoutReference,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReference {
    pub predefined_layout: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertText {
    pub object_id: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObject {
    pub object_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideo {
    pub source: &'static str,
    pub id: String,
    pub element_properties: ElementProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementProperties {
    pub page_object_id: String,
    pub size: Size,
    pub transform: AffineTransform,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Size {
    pub width: Dimension,
    pub height: Dimension,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Dimension {
    #[serde(default)]
    pub magnitude: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub unit: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoProperties {
    pub object_id: String,
    pub video_properties: VideoProperties,
    pub fields: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VideoProperties {
    pub start: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub presentation_id: Option<String>,
    pub page_size: Option<Size>,
    #[serde(default)]
    pub slides: Vec<Page>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub object_id: Option<String>,
    #[serde(default)]
    pub page_elements: Vec<PageElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    pub object_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchUpdateResponse {
    #[serde(default)]
    pub replies: Vec<Reply>,
}

/// Empty replies (`{}`) come back for requests that create nothing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub create_slide: Option<CreatedObject>,
    pub create_video: Option<CreatedObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedObject {
    pub object_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_is_tagged_by_kind() {
        let request = Request::DeleteObject(DeleteObject {
            object_id: "p1_i1".to_owned(),
        });

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "deleteObject": { "objectId": "p1_i1" } })
        );
    }

    #[test]
    fn test_create_slide_omits_missing_insertion_index() {
        let request = Request::CreateSlide(CreateSlide {
            insertion_index: None,
            slide_layout_reference: LayoutReference {
                predefined_layout: "BLANK".to_owned(),
            },
        });

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "createSlide": {
                    "slideLayoutReference": { "predefinedLayout": "BLANK" }
                }
            })
        );
    }

    #[test]
    fn test_empty_replies_deserialize() {
        let response: BatchUpdateResponse = serde_json::from_value(json!({
            "presentationId": "abc",
            "replies": [{}, { "createVideo": { "objectId": "video_1" } }]
        }))
        .unwrap();

        assert_eq!(response.replies.len(), 2);
        assert!(response.replies[0].create_video.is_none());
        assert_eq!(
            response.replies[1]
                .create_video
                .as_ref()
                .and_then(|created| created.object_id.as_deref()),
            Some("video_1")
        );
    }
}
