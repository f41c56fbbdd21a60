//! `/academy/admin/videos` endpoints.

use crate::gateway::HttpGateway;
use crate::upload::UploadFile;
use academy_core::Result;
use academy_core::delivery::DeliveryType;
use academy_core::video::{
    BulkStatusRequest, ThumbnailUploadResponse, Video, VideoCreateRequest, VideoPage, VideoQuery,
    VideoUpdateRequest, VideoUploadResponse,
};
use std::sync::Arc;

const VIDEOS_PATH: &str = "/academy/admin/videos";

#[derive(Clone)]
pub struct VideosApi {
    gateway: Arc<HttpGateway>,
}

impl VideosApi {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, query: &VideoQuery) -> Result<VideoPage> {
        self.gateway.get_json_with_query(VIDEOS_PATH, query).await
    }

    pub async fn get(&self, id: u64) -> Result<Video> {
        self.gateway
            .get_json(&format!("{VIDEOS_PATH}/{id}"))
            .await
    }

    pub async fn create(&self, request: &VideoCreateRequest) -> Result<Video> {
        self.gateway.post_json(VIDEOS_PATH, request).await
    }

    /// Sends the full record; the body repeats `id`.
    pub async fn update(&self, id: u64, fields: VideoCreateRequest) -> Result<Video> {
        let body = VideoUpdateRequest { id, fields };
        self.gateway
            .put_json(&format!("{VIDEOS_PATH}/{id}"), &body)
            .await
    }

    /// Soft delete: the server deactivates the video.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.gateway.delete(&format!("{VIDEOS_PATH}/{id}")).await
    }

    pub async fn bulk_update_status(&self, ids: &[u64], is_active: bool) -> Result<()> {
        let body = BulkStatusRequest {
            ids: ids.to_vec(),
            is_active,
        };
        self.gateway
            .post_unit(&format!("{VIDEOS_PATH}/bulk-status"), Some(&body))
            .await
    }

    pub async fn upload_video(&self, file: UploadFile) -> Result<VideoUploadResponse> {
        self.gateway
            .post_multipart(&format!("{VIDEOS_PATH}/upload"), file.into_form()?)
            .await
    }

    pub async fn upload_thumbnail(&self, file: UploadFile) -> Result<ThumbnailUploadResponse> {
        self.gateway
            .post_multipart(&format!("{VIDEOS_PATH}/upload-thumbnail"), file.into_form()?)
            .await
    }

    pub async fn delivery_types(&self) -> Result<Vec<DeliveryType>> {
        self.gateway
            .get_json("/academy/admin/delivery-types")
            .await
    }
}
