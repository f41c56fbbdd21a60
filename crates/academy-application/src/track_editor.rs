//! Mandatory track overview and per-delivery-type editor.

use crate::view_scope::{ScopeHandle, ViewScope};
use academy_core::delivery::DeliveryType;
use academy_core::ordering::{MoveDirection, move_and_resequence, resequence};
use academy_core::track::{MandatoryTrack, MandatoryTrackUpdateRequest, VideoSummary};
use academy_core::{AcademyError, Result};
use academy_interaction::TracksApi;

/// One row of the tracks overview: every delivery type, configured or not.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackOverviewEntry {
    pub delivery_type: DeliveryType,
    pub track: Option<MandatoryTrack>,
}

impl TrackOverviewEntry {
    pub fn video_count(&self) -> usize {
        self.track.as_ref().map_or(0, |track| track.videos.len())
    }
}

/// Lists the track of every delivery type, in enum order.
pub async fn track_overview(api: &TracksApi) -> Result<Vec<TrackOverviewEntry>> {
    let tracks = api.list().await?;
    Ok(DeliveryType::all()
        .into_iter()
        .map(|delivery_type| TrackOverviewEntry {
            delivery_type,
            track: tracks
                .iter()
                .find(|track| track.delivery_type == delivery_type)
                .cloned(),
        })
        .collect())
}

/// Local editing state for the track of one delivery type.
///
/// Every mutation marks the editor dirty until [`save`](Self::save) or
/// [`copy_from`](Self::copy_from) succeeds.
pub struct TrackEditor {
    api: TracksApi,
    scope: ViewScope,
    delivery_type: DeliveryType,
    pub track: Option<MandatoryTrack>,
    pub videos: Vec<VideoSummary>,
    pub available: Vec<VideoSummary>,
    dirty: bool,
}

impl TrackEditor {
    pub fn new(api: TracksApi, delivery_type: DeliveryType) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            delivery_type,
            track: None,
            videos: Vec::new(),
            available: Vec::new(),
            dirty: false,
        }
    }

    pub fn delivery_type(&self) -> DeliveryType {
        self.delivery_type
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    /// Fetches the track (possibly absent) and the candidate videos together.
    pub async fn load(&mut self) -> Result<()> {
        let delivery_type = self.delivery_type;
        let (track, available) = self
            .scope
            .run(async {
                tokio::try_join!(
                    self.api.by_delivery_type(delivery_type),
                    self.api.available_videos(delivery_type)
                )
            })
            .await?;
        self.videos = track
            .as_ref()
            .map(|track| track.videos.clone())
            .unwrap_or_default();
        self.track = track;
        self.available = available;
        self.dirty = false;
        Ok(())
    }

    /// Candidates not already in the track.
    pub fn available_for_selection(&self) -> Vec<&VideoSummary> {
        self.available
            .iter()
            .filter(|candidate| !self.videos.iter().any(|v| v.id == candidate.id))
            .collect()
    }

    /// Appends an available video; returns `false` if it is unknown or
    /// already in the track.
    pub fn add_video(&mut self, video_id: u64) -> bool {
        if self.videos.iter().any(|v| v.id == video_id) {
            return false;
        }
        let Some(video) = self.available.iter().find(|v| v.id == video_id).cloned() else {
            return false;
        };
        self.videos.push(video);
        resequence(&mut self.videos);
        self.dirty = true;
        true
    }

    pub fn remove_video(&mut self, video_id: u64) -> bool {
        let before = self.videos.len();
        self.videos.retain(|v| v.id != video_id);
        let removed = self.videos.len() != before;
        if removed {
            resequence(&mut self.videos);
            self.dirty = true;
        }
        removed
    }

    pub fn move_video(&mut self, index: usize, direction: MoveDirection) -> bool {
        let moved = move_and_resequence(&mut self.videos, index, direction);
        self.dirty |= moved;
        moved
    }

    pub fn video_ids(&self) -> Vec<u64> {
        self.videos.iter().map(|v| v.id).collect()
    }

    /// Pushes the full ordered list as the active track.
    pub async fn save(&mut self) -> Result<()> {
        let request = MandatoryTrackUpdateRequest {
            delivery_type: self.delivery_type,
            video_ids: self.video_ids(),
            is_active: Some(true),
        };
        let saved = self.scope.run(self.api.save(&request)).await?;
        tracing::info!(
            delivery_type = %self.delivery_type,
            videos = request.video_ids.len(),
            "Saved mandatory track"
        );
        self.track = Some(saved);
        self.dirty = false;
        Ok(())
    }

    /// Replaces this track's whole list with `source`'s.
    pub async fn copy_from(&mut self, source: DeliveryType) -> Result<()> {
        if source == self.delivery_type {
            return Err(AcademyError::validation(format!(
                "Cannot copy the {} track onto itself",
                source.label()
            )));
        }
        let copied = self
            .scope
            .run(self.api.copy(source, self.delivery_type))
            .await?;
        tracing::info!(
            from = %source,
            to = %self.delivery_type,
            "Copied mandatory track"
        );
        self.videos = copied.videos.clone();
        self.track = Some(copied);
        self.dirty = false;
        Ok(())
    }

    /// Deactivates the loaded track on the server. The track stays
    /// retrievable; only its active flag changes.
    pub async fn deactivate(&mut self) -> Result<()> {
        let id = self
            .track
            .as_ref()
            .map(|track| track.id)
            .ok_or_else(|| AcademyError::not_found("MandatoryTrack", self.delivery_type.to_string()))?;
        self.scope.run(self.api.delete(id)).await?;
        tracing::info!(delivery_type = %self.delivery_type, track_id = id, "Deactivated mandatory track");
        if let Some(track) = self.track.as_mut() {
            track.is_active = false;
        }
        Ok(())
    }
}
