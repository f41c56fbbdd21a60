//! Read-only analytics endpoints.

use crate::gateway::HttpGateway;
use academy_core::Result;
use academy_core::analytics::{AnalyticsFilters, AnalyticsOverview, RiderProgressPage, VideoAnalytics};
use std::sync::Arc;

const ANALYTICS_PATH: &str = "/academy/admin/analytics";

#[derive(Clone)]
pub struct AnalyticsApi {
    gateway: Arc<HttpGateway>,
}

impl AnalyticsApi {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    pub async fn overview(&self) -> Result<AnalyticsOverview> {
        self.gateway
            .get_json(&format!("{ANALYTICS_PATH}/overview"))
            .await
    }

    pub async fn riders(
        &self,
        filters: &AnalyticsFilters,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<RiderProgressPage> {
        let query = filters.rider_page_query(page, page_size);
        self.gateway
            .get_json_with_query(&format!("{ANALYTICS_PATH}/riders"), &query)
            .await
    }

    pub async fn videos(&self) -> Result<Vec<VideoAnalytics>> {
        self.gateway
            .get_json(&format!("{ANALYTICS_PATH}/videos"))
            .await
    }

    /// Raw CSV of the riders matching `filters`.
    pub async fn export_riders_csv(&self, filters: &AnalyticsFilters) -> Result<Vec<u8>> {
        self.gateway
            .get_bytes_with_query(&format!("{ANALYTICS_PATH}/export/riders"), &filters.query_pairs())
            .await
    }
}
