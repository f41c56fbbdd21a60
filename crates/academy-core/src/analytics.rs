//! Read-only completion analytics.

use crate::delivery::DeliveryType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub const DEFAULT_RIDER_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsOverview {
    pub total_riders: u64,
    pub completed_training: u64,
    pub in_progress: u64,
    pub not_started: u64,
    pub completion_rate: f64,
    pub avg_completion_days: f64,
    pub avg_quiz_score: f64,
    pub total_videos_watched: u64,
    pub total_quizzes_passed: u64,
}

/// Training progress of one rider. `delivery_type` and `status` are kept as
/// the server sent them; this record is only displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderProgressSummary {
    pub rider_id: u64,
    #[serde(default)]
    pub rider_name: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub delivery_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub videos_completed: u32,
    #[serde(default)]
    pub total_videos: u32,
    #[serde(default)]
    pub avg_quiz_score: Option<f64>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiderProgressPage {
    pub riders: Vec<RiderProgressSummary>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoAnalytics {
    pub video_id: u64,
    pub title: String,
    pub duration_seconds: u32,
    pub total_views: u64,
    pub completions: u64,
    pub avg_watch_time_seconds: f64,
    pub avg_watch_percentage: f64,
    pub quiz_attempts: u64,
    pub quiz_passes: u64,
    pub quiz_pass_rate: f64,
    pub avg_quiz_score: f64,
}

/// Training status used to filter riders.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum RiderStatus {
    Completed,
    InProgress,
    NotStarted,
}

/// Filters shared by the rider list and the CSV export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsFilters {
    pub delivery_type: Option<DeliveryType>,
    pub status: Option<RiderStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AnalyticsFilters {
    /// Query pairs for the filters that are set, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(delivery_type) = self.delivery_type {
            pairs.push(("deliveryType", delivery_type.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(start) = self.start_date {
            pairs.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        pairs
    }

    /// Rider list query: filters plus `page` (default 0) and `pageSize`
    /// (default 20).
    pub fn rider_page_query(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Vec<(&'static str, String)> {
        let mut pairs = self.query_pairs();
        pairs.push(("page", page.unwrap_or(0).to_string()));
        pairs.push((
            "pageSize",
            page_size
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_RIDER_PAGE_SIZE)
                .to_string(),
        ));
        pairs
    }
}

/// File name of a CSV export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("rider_progress_{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_empty_filters_only_page_defaults() {
        let pairs = AnalyticsFilters::default().rider_page_query(None, None);
        assert_eq!(
            pairs,
            vec![("page", "0".to_string()), ("pageSize", "20".to_string())]
        );
    }

    #[test]
    fn test_filters_serialize_in_order() {
        let filters = AnalyticsFilters {
            delivery_type: Some(DeliveryType::Bluedart),
            status: Some(RiderStatus::InProgress),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5),
            end_date: None,
        };
        assert_eq!(
            filters.query_pairs(),
            vec![
                ("deliveryType", "BLUEDART".to_string()),
                ("status", "IN_PROGRESS".to_string()),
                ("startDate", "2026-01-05".to_string()),
            ]
        );
    }

    #[test]
    fn test_rider_status_parse() {
        assert_eq!(
            RiderStatus::from_str("not_started").unwrap(),
            RiderStatus::NotStarted
        );
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(export_file_name(date), "rider_progress_2026-10-18.csv");
    }

    #[test]
    fn test_overview_tolerates_missing_fields() {
        let overview: AnalyticsOverview =
            serde_json::from_str(r#"{"totalRiders": 12, "completionRate": 41.5}"#).unwrap();
        assert_eq!(overview.total_riders, 12);
        assert_eq!(overview.in_progress, 0);
    }
}
