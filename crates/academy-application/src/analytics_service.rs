//! Analytics dashboard state and CSV export.

use crate::view_scope::{ScopeHandle, ViewScope};
use academy_core::analytics::{
    AnalyticsFilters, AnalyticsOverview, RiderProgressPage, VideoAnalytics, export_file_name,
};
use academy_core::{AcademyError, Result};
use academy_interaction::AnalyticsApi;
use std::path::{Path, PathBuf};

/// Riders shown per dashboard page.
pub const RIDER_PAGE_SIZE: u32 = 10;

pub struct AnalyticsDashboard {
    api: AnalyticsApi,
    scope: ViewScope,
    pub filters: AnalyticsFilters,
    pub page: u32,
    pub page_size: u32,
    pub overview: Option<AnalyticsOverview>,
    pub riders: Option<RiderProgressPage>,
    pub videos: Vec<VideoAnalytics>,
}

impl AnalyticsDashboard {
    pub fn new(api: AnalyticsApi) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            filters: AnalyticsFilters::default(),
            page: 0,
            page_size: RIDER_PAGE_SIZE,
            overview: None,
            riders: None,
            videos: Vec::new(),
        }
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub async fn load_overview(&mut self) -> Result<&AnalyticsOverview> {
        let overview = self.scope.run(self.api.overview()).await?;
        Ok(self.overview.insert(overview))
    }

    pub async fn load_videos(&mut self) -> Result<&[VideoAnalytics]> {
        self.videos = self.scope.run(self.api.videos()).await?;
        Ok(&self.videos)
    }

    pub async fn load_riders(&mut self) -> Result<&RiderProgressPage> {
        let page = self.fetch_riders(&self.filters, self.page).await?;
        Ok(self.riders.insert(page))
    }

    /// Replaces the filters and rewinds to the first page without loading.
    pub fn apply_filters(&mut self, filters: AnalyticsFilters) -> Result<()> {
        validate_date_range(&filters)?;
        self.filters = filters;
        self.page = 0;
        Ok(())
    }

    /// Replaces the filters and reloads riders from the first page. On
    /// failure the previous filters and page stay in place.
    pub async fn set_filters(&mut self, filters: AnalyticsFilters) -> Result<&RiderProgressPage> {
        validate_date_range(&filters)?;
        let riders = self.fetch_riders(&filters, 0).await?;
        self.filters = filters;
        self.page = 0;
        Ok(self.riders.insert(riders))
    }

    pub fn has_next_page(&self) -> bool {
        self.riders
            .as_ref()
            .is_some_and(|riders| self.page + 1 < riders.total_pages)
    }

    /// Advances one page; returns `false` on the last page.
    pub async fn next_page(&mut self) -> Result<bool> {
        if !self.has_next_page() {
            return Ok(false);
        }
        self.turn_to(self.page + 1).await?;
        Ok(true)
    }

    pub async fn previous_page(&mut self) -> Result<bool> {
        if self.page == 0 {
            return Ok(false);
        }
        self.turn_to(self.page - 1).await?;
        Ok(true)
    }

    /// `page` only moves once its riders have arrived.
    async fn turn_to(&mut self, page: u32) -> Result<()> {
        let riders = self.fetch_riders(&self.filters, page).await?;
        self.page = page;
        self.riders = Some(riders);
        Ok(())
    }

    async fn fetch_riders(
        &self,
        filters: &AnalyticsFilters,
        page: u32,
    ) -> Result<RiderProgressPage> {
        self.scope
            .run(self.api.riders(filters, Some(page), Some(self.page_size)))
            .await
    }

    /// Downloads the rider CSV for the current filters into `dir` and
    /// returns the written path.
    pub async fn export_csv(&self, dir: &Path) -> Result<PathBuf> {
        let bytes = self
            .scope
            .run(self.api.export_riders_csv(&self.filters))
            .await?;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(export_file_name(chrono::Local::now().date_naive()));
        tokio::fs::write(&path, &bytes).await?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "Exported rider progress");
        Ok(path)
    }
}

fn validate_date_range(filters: &AnalyticsFilters) -> Result<()> {
    let inverted = filters
        .start_date
        .zip(filters.end_date)
        .is_some_and(|(start, end)| start > end);
    if inverted {
        return Err(AcademyError::validation(
            "Start date must not be after end date",
        ));
    }
    Ok(())
}
