//! Mandatory video tracks, one per delivery type.

use crate::delivery::DeliveryType;
use crate::ordering::Sequenced;
use serde::{Deserialize, Serialize};

/// Lightweight video entry used inside tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub duration_seconds: u32,
    #[serde(default)]
    pub sequence_order: u32,
}

impl Sequenced for VideoSummary {
    fn set_sequence_order(&mut self, order: u32) {
        self.sequence_order = order;
    }
}

/// The ordered list of videos riders of one delivery type must complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MandatoryTrack {
    pub id: u64,
    pub delivery_type: DeliveryType,
    #[serde(default)]
    pub video_ids: Vec<u64>,
    #[serde(default)]
    pub videos: Vec<VideoSummary>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl MandatoryTrack {
    /// Total runtime of the track in seconds.
    pub fn total_duration_seconds(&self) -> u64 {
        self.videos.iter().map(|v| u64::from(v.duration_seconds)).sum()
    }
}

/// Body of `POST /academy/admin/tracks` (create or replace).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MandatoryTrackUpdateRequest {
    pub delivery_type: DeliveryType,
    pub video_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Query of `POST /academy/admin/tracks/copy`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyTrackQuery {
    pub source_delivery_type: DeliveryType,
    pub target_delivery_type: DeliveryType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_parses_with_missing_lists() {
        let json = r#"{"id": 3, "deliveryType": "DELHIVERY", "isActive": true}"#;
        let track: MandatoryTrack = serde_json::from_str(json).unwrap();
        assert_eq!(track.delivery_type, DeliveryType::Delhivery);
        assert!(track.videos.is_empty());
        assert_eq!(track.total_duration_seconds(), 0);
    }

    #[test]
    fn test_copy_query_names() {
        let query = serde_json::to_value(CopyTrackQuery {
            source_delivery_type: DeliveryType::Amazon,
            target_delivery_type: DeliveryType::Zomato,
        })
        .unwrap();
        assert_eq!(query["sourceDeliveryType"], "AMAZON");
        assert_eq!(query["targetDeliveryType"], "ZOMATO");
    }
}
