//! Training video records, list queries and the create/edit form.

use crate::delivery::DeliveryType;
use crate::error::{AcademyError, Result};
use serde::{Deserialize, Serialize};

/// A training video as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_seconds: u32,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub sequence_order: u32,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub delivery_types: Vec<DeliveryType>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of a create request. Updates send the same fields plus `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCreateRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub duration_seconds: u32,
    pub video_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub sequence_order: u32,
    pub is_mandatory: bool,
    pub is_active: bool,
    pub delivery_types: Vec<DeliveryType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoUpdateRequest {
    pub id: u64,
    #[serde(flatten)]
    pub fields: VideoCreateRequest,
}

/// One page of `GET /academy/admin/videos`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPage {
    #[serde(default)]
    pub content: Vec<Video>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

/// Query string of the video list. Absent fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_type: Option<DeliveryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusRequest {
    pub ids: Vec<u64>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoUploadResponse {
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailUploadResponse {
    pub thumbnail_url: String,
}

/// Status filter of the list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    /// `isActive` query value; `None` means "do not filter".
    pub fn as_is_active(&self) -> Option<bool> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(true),
            StatusFilter::Inactive => Some(false),
        }
    }
}

/// Editable state of the create/edit screen.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoForm {
    pub title: String,
    pub description: String,
    pub duration_seconds: u32,
    pub video_url: String,
    pub thumbnail_url: String,
    pub sequence_order: u32,
    pub is_mandatory: bool,
    pub is_active: bool,
    pub delivery_types: Vec<DeliveryType>,
}

impl Default for VideoForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            duration_seconds: 0,
            video_url: String::new(),
            thumbnail_url: String::new(),
            sequence_order: 1,
            is_mandatory: true,
            is_active: true,
            delivery_types: Vec::new(),
        }
    }
}

impl From<&Video> for VideoForm {
    fn from(video: &Video) -> Self {
        Self {
            title: video.title.clone(),
            description: video.description.clone().unwrap_or_default(),
            duration_seconds: video.duration_seconds,
            video_url: video.video_url.clone(),
            thumbnail_url: video.thumbnail_url.clone().unwrap_or_default(),
            sequence_order: video.sequence_order,
            is_mandatory: video.is_mandatory,
            is_active: video.is_active,
            delivery_types: video.delivery_types.clone(),
        }
    }
}

impl VideoForm {
    /// Adds the type if missing, removes it if present.
    pub fn toggle_delivery_type(&mut self, delivery_type: DeliveryType) {
        if let Some(pos) = self.delivery_types.iter().position(|t| *t == delivery_type) {
            self.delivery_types.remove(pos);
        } else {
            self.delivery_types.push(delivery_type);
        }
    }

    /// Folds an upload result into the form.
    ///
    /// The server-generated thumbnail is only taken when the admin has not
    /// chosen one yet.
    pub fn apply_video_upload(&mut self, upload: &VideoUploadResponse) {
        self.video_url = upload.video_url.clone();
        if let Some(duration) = upload.duration_seconds.filter(|d| *d > 0) {
            self.duration_seconds = duration;
        }
        if self.thumbnail_url.is_empty() {
            if let Some(thumbnail) = &upload.thumbnail_url {
                self.thumbnail_url = thumbnail.clone();
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AcademyError::validation("Title is required"));
        }
        if self.video_url.is_empty() {
            return Err(AcademyError::validation(
                "Video URL is required. Please upload a video.",
            ));
        }
        if self.delivery_types.is_empty() {
            return Err(AcademyError::validation(
                "At least one delivery type must be selected",
            ));
        }
        Ok(())
    }

    /// Validates, then builds the request body with blanks dropped.
    pub fn to_request(&self) -> Result<VideoCreateRequest> {
        self.validate()?;
        let description = self.description.trim();
        Ok(VideoCreateRequest {
            title: self.title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            duration_seconds: self.duration_seconds,
            video_url: self.video_url.clone(),
            thumbnail_url: (!self.thumbnail_url.is_empty()).then(|| self.thumbnail_url.clone()),
            sequence_order: self.sequence_order,
            is_mandatory: self.is_mandatory,
            is_active: self.is_active,
            delivery_types: self.delivery_types.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> VideoForm {
        VideoForm {
            title: "  Safe riding  ".into(),
            description: "   ".into(),
            video_url: "https://cdn/v.mp4".into(),
            delivery_types: vec![DeliveryType::Swiggy],
            ..VideoForm::default()
        }
    }

    #[test]
    fn test_validation_order() {
        let mut form = filled_form();
        form.title = " ".into();
        assert_eq!(form.validate().unwrap_err().to_string(), "Title is required");

        let mut form = filled_form();
        form.video_url.clear();
        assert!(form.validate().unwrap_err().to_string().starts_with("Video URL"));

        let mut form = filled_form();
        form.delivery_types.clear();
        assert!(form.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_to_request_trims_and_drops_blanks() {
        let request = filled_form().to_request().unwrap();
        assert_eq!(request.title, "Safe riding");
        assert_eq!(request.description, None);
        assert_eq!(request.thumbnail_url, None);

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("description").is_none());
        assert_eq!(body["deliveryTypes"][0], "SWIGGY");
    }

    #[test]
    fn test_update_request_flattens_fields() {
        let body = serde_json::to_value(VideoUpdateRequest {
            id: 9,
            fields: filled_form().to_request().unwrap(),
        })
        .unwrap();
        assert_eq!(body["id"], 9);
        assert_eq!(body["isMandatory"], true);
    }

    #[test]
    fn test_upload_keeps_chosen_thumbnail() {
        let mut form = filled_form();
        form.thumbnail_url = "https://cdn/mine.png".into();
        form.apply_video_upload(&VideoUploadResponse {
            video_url: "https://cdn/new.mp4".into(),
            thumbnail_url: Some("https://cdn/auto.png".into()),
            duration_seconds: Some(125),
        });
        assert_eq!(form.video_url, "https://cdn/new.mp4");
        assert_eq!(form.thumbnail_url, "https://cdn/mine.png");
        assert_eq!(form.duration_seconds, 125);
    }

    #[test]
    fn test_toggle_delivery_type() {
        let mut form = VideoForm::default();
        form.toggle_delivery_type(DeliveryType::Amazon);
        form.toggle_delivery_type(DeliveryType::Zomato);
        form.toggle_delivery_type(DeliveryType::Amazon);
        assert_eq!(form.delivery_types, vec![DeliveryType::Zomato]);
    }

    #[test]
    fn test_status_filter_query_value() {
        assert_eq!(StatusFilter::All.as_is_active(), None);
        assert_eq!(StatusFilter::Inactive.as_is_active(), Some(false));
    }
}
