use super::{cancel_on_interrupt, require_login};
use academy_application::AdminConsole;
use academy_core::analytics::{AnalyticsFilters, RiderStatus};
use academy_core::delivery::DeliveryType;
use academy_core::format::{format_date, format_duration};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum AnalyticsCommand {
    /// Headline completion numbers
    Overview,
    /// Per-rider progress
    Riders {
        #[command(flatten)]
        filters: FilterArgs,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Per-video engagement
    Videos,
    /// Download rider progress as CSV
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        /// Directory to write into (defaults to the configured export directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct FilterArgs {
    #[arg(long, value_name = "TYPE")]
    delivery_type: Option<DeliveryType>,
    /// COMPLETED, IN_PROGRESS or NOT_STARTED
    #[arg(long)]
    status: Option<RiderStatus>,
    /// First day, YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    from: Option<NaiveDate>,
    /// Last day, YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    to: Option<NaiveDate>,
}

impl From<FilterArgs> for AnalyticsFilters {
    fn from(args: FilterArgs) -> Self {
        AnalyticsFilters {
            delivery_type: args.delivery_type,
            status: args.status,
            start_date: args.from,
            end_date: args.to,
        }
    }
}

pub async fn run(console: &AdminConsole, command: AnalyticsCommand) -> Result<()> {
    require_login(console)?;
    let mut dashboard = console.analytics();
    cancel_on_interrupt(dashboard.scope_handle());

    match command {
        AnalyticsCommand::Overview => {
            let overview = dashboard.load_overview().await?;
            println!("{:<24} {}", "Riders", overview.total_riders);
            println!("{:<24} {}", "Completed", overview.completed_training);
            println!("{:<24} {}", "In progress", overview.in_progress);
            println!("{:<24} {}", "Not started", overview.not_started);
            println!("{:<24} {:.1}%", "Completion rate", overview.completion_rate);
            println!("{:<24} {:.1}", "Avg. days to complete", overview.avg_completion_days);
            println!("{:<24} {:.1}", "Avg. quiz score", overview.avg_quiz_score);
            println!("{:<24} {}", "Videos watched", overview.total_videos_watched);
            println!("{:<24} {}", "Quizzes passed", overview.total_quizzes_passed);
        }
        AnalyticsCommand::Riders { filters, page } => {
            dashboard.apply_filters(filters.into())?;
            dashboard.page = page.saturating_sub(1);
            let riders = dashboard.load_riders().await?;
            if riders.riders.is_empty() {
                println!("{}", "No riders match".bright_black());
            }
            for rider in &riders.riders {
                let score = rider
                    .avg_quiz_score
                    .map_or_else(|| "-".to_string(), |s| format!("{s:.1}"));
                println!(
                    "{:>6}  {:<24} {:<10} {:<12} {:>2}/{:<2}  {:>5}  {}",
                    rider.rider_id,
                    rider.rider_name,
                    rider.delivery_type,
                    rider.status,
                    rider.videos_completed,
                    rider.total_videos,
                    score,
                    format_date(rider.started_at.as_deref())
                );
            }
            println!(
                "{}",
                format!(
                    "Page {} of {} ({} riders)",
                    riders.page + 1,
                    riders.total_pages.max(1),
                    riders.total_count
                )
                .bright_black()
            );
        }
        AnalyticsCommand::Videos => {
            for video in dashboard.load_videos().await? {
                println!(
                    "{:>5}  {:<36} {:>6}  {:>5} views  {:>5.1}% watched  {:>5.1}% pass",
                    video.video_id,
                    video.title,
                    format_duration(f64::from(video.duration_seconds)),
                    video.total_views,
                    video.avg_watch_percentage,
                    video.quiz_pass_rate
                );
            }
        }
        AnalyticsCommand::Export { filters, dir } => {
            dashboard.apply_filters(filters.into())?;
            let dir = dir.unwrap_or_else(|| console.export_dir().to_path_buf());
            let path = dashboard.export_csv(&dir).await?;
            println!("{}", format!("Exported {}", path.display()).green());
        }
    }
    Ok(())
}
