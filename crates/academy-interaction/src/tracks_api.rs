//! Mandatory track endpoints.

use crate::gateway::HttpGateway;
use academy_core::delivery::DeliveryType;
use academy_core::track::{CopyTrackQuery, MandatoryTrack, MandatoryTrackUpdateRequest, VideoSummary};
use academy_core::Result;
use std::sync::Arc;

const TRACKS_PATH: &str = "/academy/admin/tracks";

#[derive(Clone)]
pub struct TracksApi {
    gateway: Arc<HttpGateway>,
}

impl TracksApi {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<MandatoryTrack>> {
        self.gateway.get_json(TRACKS_PATH).await
    }

    /// Track of one delivery type; `Ok(None)` when none is configured yet.
    pub async fn by_delivery_type(
        &self,
        delivery_type: DeliveryType,
    ) -> Result<Option<MandatoryTrack>> {
        match self
            .gateway
            .get_json(&format!("{TRACKS_PATH}/{delivery_type}"))
            .await
        {
            Ok(track) => Ok(Some(track)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Active videos that may be placed in `delivery_type`'s track.
    pub async fn available_videos(&self, delivery_type: DeliveryType) -> Result<Vec<VideoSummary>> {
        self.gateway
            .get_json(&format!("{TRACKS_PATH}/{delivery_type}/available-videos"))
            .await
    }

    /// Creates or replaces the track of `request.delivery_type`.
    pub async fn save(&self, request: &MandatoryTrackUpdateRequest) -> Result<MandatoryTrack> {
        self.gateway.post_json(TRACKS_PATH, request).await
    }

    /// Replaces `target`'s list with `source`'s; returns the new target track.
    pub async fn copy(&self, source: DeliveryType, target: DeliveryType) -> Result<MandatoryTrack> {
        let query = CopyTrackQuery {
            source_delivery_type: source,
            target_delivery_type: target,
        };
        self.gateway
            .post_query(&format!("{TRACKS_PATH}/copy"), &query)
            .await
    }

    /// Deactivates a track.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.gateway.delete(&format!("{TRACKS_PATH}/{id}")).await
    }
}
