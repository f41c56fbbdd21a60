//! Video list and video create/edit use cases.

use crate::view_scope::{ScopeHandle, ViewScope};
use academy_core::delivery::DeliveryType;
use academy_core::video::{StatusFilter, Video, VideoForm, VideoPage, VideoQuery};
use academy_core::{AcademyError, Result};
use academy_interaction::{UploadFile, VideosApi};
use std::collections::BTreeSet;

/// Rows per page of the video list.
pub const VIDEO_PAGE_SIZE: u32 = 10;

/// State of the paginated, filterable video list.
pub struct VideoCatalog {
    api: VideosApi,
    scope: ViewScope,
    pub videos: Vec<Video>,
    pub page: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub search_title: String,
    pub delivery_filter: Option<DeliveryType>,
    pub status_filter: StatusFilter,
    selected: BTreeSet<u64>,
}

impl VideoCatalog {
    pub fn new(api: VideosApi) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            videos: Vec::new(),
            page: 0,
            total_pages: 0,
            total_elements: 0,
            search_title: String::new(),
            delivery_filter: None,
            status_filter: StatusFilter::All,
            selected: BTreeSet::new(),
        }
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    /// The list query for the current page and filters.
    pub fn query(&self) -> VideoQuery {
        list_query(
            self.page,
            &self.search_title,
            self.delivery_filter,
            self.status_filter,
        )
    }

    /// Fetches the current page.
    pub async fn load(&mut self) -> Result<()> {
        let page = self.fetch(self.query()).await?;
        self.show(page);
        Ok(())
    }

    /// Applies a title search from the first page. The previous search stays
    /// in effect if the fetch fails.
    pub async fn search(&mut self, title: &str) -> Result<()> {
        let query = list_query(0, title, self.delivery_filter, self.status_filter);
        let page = self.fetch(query).await?;
        self.search_title = title.to_string();
        self.page = 0;
        self.show(page);
        Ok(())
    }

    pub async fn set_filters(
        &mut self,
        delivery_type: Option<DeliveryType>,
        status: StatusFilter,
    ) -> Result<()> {
        let query = list_query(0, &self.search_title, delivery_type, status);
        let page = self.fetch(query).await?;
        self.delivery_filter = delivery_type;
        self.status_filter = status;
        self.page = 0;
        self.show(page);
        Ok(())
    }

    pub async fn go_to_page(&mut self, page: u32) -> Result<()> {
        let target = page.min(self.total_pages.saturating_sub(1));
        let query = list_query(
            target,
            &self.search_title,
            self.delivery_filter,
            self.status_filter,
        );
        let page = self.fetch(query).await?;
        self.page = target;
        self.show(page);
        Ok(())
    }

    async fn fetch(&self, query: VideoQuery) -> Result<VideoPage> {
        self.scope.run(self.api.list(&query)).await
    }

    fn show(&mut self, page: VideoPage) {
        self.videos = page.content;
        self.total_pages = page.total_pages;
        self.total_elements = page.total_elements;
    }

    pub fn selected_ids(&self) -> Vec<u64> {
        self.selected.iter().copied().collect()
    }

    pub fn toggle_selection(&mut self, id: u64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Selects every video on the page, or clears the selection when all of
    /// them are already selected.
    pub fn toggle_select_all(&mut self) {
        let page_ids: Vec<u64> = self.videos.iter().map(|v| v.id).collect();
        if !page_ids.is_empty() && page_ids.iter().all(|id| self.selected.contains(id)) {
            self.selected.clear();
        } else {
            self.selected.extend(page_ids);
        }
    }

    /// Activates or deactivates the selection, then reloads.
    pub async fn bulk_set_active(&mut self, is_active: bool) -> Result<()> {
        if self.selected.is_empty() {
            return Err(AcademyError::validation("Select at least one video"));
        }
        let ids = self.selected_ids();
        self.scope
            .run(self.api.bulk_update_status(&ids, is_active))
            .await?;
        tracing::info!(count = ids.len(), is_active, "Updated video status");
        self.selected.clear();
        self.load().await
    }

    /// Soft-deletes a video, then reloads.
    pub async fn delete(&mut self, id: u64) -> Result<()> {
        self.scope.run(self.api.delete(id)).await?;
        tracing::info!(video_id = id, "Deactivated video");
        self.selected.remove(&id);
        self.load().await
    }
}

fn list_query(
    page: u32,
    title: &str,
    delivery_type: Option<DeliveryType>,
    status: StatusFilter,
) -> VideoQuery {
    let title = title.trim();
    VideoQuery {
        page: Some(page),
        size: Some(VIDEO_PAGE_SIZE),
        title: (!title.is_empty()).then(|| title.to_string()),
        delivery_type,
        is_active: status.as_is_active(),
    }
}

/// State of the create/edit screen.
pub struct VideoEditor {
    api: VideosApi,
    scope: ViewScope,
    editing_id: Option<u64>,
    pub form: VideoForm,
}

impl VideoEditor {
    /// An empty form for a new video.
    pub fn create(api: VideosApi) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            editing_id: None,
            form: VideoForm::default(),
        }
    }

    /// A form pre-filled from an existing video.
    pub async fn edit(api: VideosApi, id: u64) -> Result<Self> {
        let mut editor = Self::create(api);
        let video = editor.scope.run(editor.api.get(id)).await?;
        editor.form = VideoForm::from(&video);
        editor.editing_id = Some(id);
        Ok(editor)
    }

    pub fn editing_id(&self) -> Option<u64> {
        self.editing_id
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    /// Uploads the video file and folds the result into the form.
    pub async fn upload_video(&mut self, file: UploadFile) -> Result<()> {
        if !file.is_video() {
            return Err(AcademyError::validation("Please select a video file"));
        }
        let uploaded = self.scope.run(self.api.upload_video(file)).await?;
        self.form.apply_video_upload(&uploaded);
        Ok(())
    }

    pub async fn upload_thumbnail(&mut self, file: UploadFile) -> Result<()> {
        if !file.is_image() {
            return Err(AcademyError::validation("Please select an image file"));
        }
        let uploaded = self.scope.run(self.api.upload_thumbnail(file)).await?;
        self.form.thumbnail_url = uploaded.thumbnail_url;
        Ok(())
    }

    /// Validates the form, then creates or updates the video.
    pub async fn save(&mut self) -> Result<Video> {
        let request = self.form.to_request()?;
        let saved = match self.editing_id {
            Some(id) => self.scope.run(self.api.update(id, request)).await?,
            None => self.scope.run(self.api.create(&request)).await?,
        };
        tracing::info!(video_id = saved.id, "Saved video");
        self.editing_id = Some(saved.id);
        Ok(saved)
    }
}
