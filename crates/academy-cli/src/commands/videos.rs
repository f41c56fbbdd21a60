use super::{active_label, cancel_on_interrupt, require_login};
use academy_application::{AdminConsole, VideoEditor};
use academy_core::delivery::DeliveryType;
use academy_core::format::{format_date, format_duration};
use academy_core::video::{StatusFilter, Video};
use academy_interaction::UploadFile;
use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum VideosCommand {
    /// List videos, ten per page
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_name = "TYPE")]
        delivery_type: Option<DeliveryType>,
        #[arg(long, value_enum, default_value_t = Status::All)]
        status: Status,
    },
    /// Show one video
    Show { id: u64 },
    /// Create a video, uploading its file first
    Create(VideoFields),
    /// Change fields of an existing video
    Update {
        id: u64,
        #[command(flatten)]
        fields: VideoFields,
    },
    /// Deactivate a video (it stays retrievable)
    Delete { id: u64 },
    /// Mark videos active
    Activate {
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// Mark videos inactive
    Deactivate {
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// List the delivery types the server knows
    DeliveryTypes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Status {
    All,
    Active,
    Inactive,
}

impl From<Status> for StatusFilter {
    fn from(status: Status) -> Self {
        match status {
            Status::All => StatusFilter::All,
            Status::Active => StatusFilter::Active,
            Status::Inactive => StatusFilter::Inactive,
        }
    }
}

#[derive(Args)]
pub struct VideoFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Video file to upload
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
    /// Image to upload as thumbnail
    #[arg(long, value_name = "PATH")]
    thumbnail: Option<PathBuf>,
    /// Delivery type the video applies to; repeat for several
    #[arg(long = "delivery-type", value_name = "TYPE")]
    delivery_types: Vec<DeliveryType>,
    #[arg(long)]
    sequence: Option<u32>,
    #[arg(long)]
    mandatory: Option<bool>,
    #[arg(long)]
    active: Option<bool>,
}

pub async fn run(console: &AdminConsole, command: VideosCommand) -> Result<()> {
    require_login(console)?;
    match command {
        VideosCommand::List {
            page,
            search,
            delivery_type,
            status,
        } => {
            let mut catalog = console.video_catalog();
            catalog.page = page.saturating_sub(1);
            catalog.search_title = search.unwrap_or_default();
            catalog.delivery_filter = delivery_type;
            catalog.status_filter = status.into();
            catalog.load().await?;

            if catalog.videos.is_empty() {
                println!("{}", "No videos found".bright_black());
                return Ok(());
            }
            for video in &catalog.videos {
                print_row(video);
            }
            println!(
                "{}",
                format!(
                    "Page {} of {} ({} videos)",
                    catalog.page + 1,
                    catalog.total_pages.max(1),
                    catalog.total_elements
                )
                .bright_black()
            );
        }
        VideosCommand::Show { id } => {
            let video = console.videos_api().get(id).await?;
            print_details(&video);
        }
        VideosCommand::Create(fields) => {
            let mut editor = console.new_video();
            apply_fields(&mut editor, fields).await?;
            let video = editor.save().await?;
            println!("{}", format!("Created video {}", video.id).green());
            print_details(&video);
        }
        VideosCommand::Update { id, fields } => {
            let mut editor = console.edit_video(id).await?;
            apply_fields(&mut editor, fields).await?;
            let video = editor.save().await?;
            println!("{}", format!("Updated video {}", video.id).green());
        }
        VideosCommand::Delete { id } => {
            console.videos_api().delete(id).await?;
            println!("{}", format!("Deactivated video {id}").green());
        }
        VideosCommand::Activate { ids } => set_active(console, ids, true).await?,
        VideosCommand::Deactivate { ids } => set_active(console, ids, false).await?,
        VideosCommand::DeliveryTypes => {
            for delivery_type in console.videos_api().delivery_types().await? {
                println!("{:<10} {}", delivery_type.to_string(), delivery_type.label());
            }
        }
    }
    Ok(())
}

async fn apply_fields(editor: &mut VideoEditor, fields: VideoFields) -> Result<()> {
    cancel_on_interrupt(editor.scope_handle());

    if let Some(path) = fields.file {
        println!("{}", format!("Uploading {}...", path.display()).bright_black());
        editor.upload_video(UploadFile::from_path(&path).await?).await?;
    }
    if let Some(path) = fields.thumbnail {
        editor
            .upload_thumbnail(UploadFile::from_path(&path).await?)
            .await?;
    }

    let form = &mut editor.form;
    if let Some(title) = fields.title {
        form.title = title;
    }
    if let Some(description) = fields.description {
        form.description = description;
    }
    if !fields.delivery_types.is_empty() {
        form.delivery_types = fields.delivery_types;
    }
    if let Some(sequence) = fields.sequence {
        form.sequence_order = sequence;
    }
    if let Some(mandatory) = fields.mandatory {
        form.is_mandatory = mandatory;
    }
    if let Some(active) = fields.active {
        form.is_active = active;
    }
    Ok(())
}

async fn set_active(console: &AdminConsole, ids: Vec<u64>, is_active: bool) -> Result<()> {
    let mut catalog = console.video_catalog();
    for id in &ids {
        catalog.toggle_selection(*id);
    }
    catalog.bulk_set_active(is_active).await?;
    println!(
        "{}",
        format!("Marked {} video(s) {}", ids.len(), active_label(is_active)).green()
    );
    Ok(())
}

fn print_row(video: &Video) {
    let types: Vec<String> = video.delivery_types.iter().map(ToString::to_string).collect();
    println!(
        "{:>5}  {:<40} {:>6}  {:<8} {}",
        video.id,
        video.title,
        format_duration(f64::from(video.duration_seconds)),
        active_label(video.is_active),
        types.join(",").bright_black()
    );
}

fn print_details(video: &Video) {
    println!("{} {}", "Title:".bold(), video.title);
    if let Some(description) = &video.description {
        println!("{} {}", "Description:".bold(), description);
    }
    println!(
        "{} {}",
        "Duration:".bold(),
        format_duration(f64::from(video.duration_seconds))
    );
    println!("{} {}", "Video:".bold(), video.video_url);
    println!(
        "{} {}",
        "Thumbnail:".bold(),
        video.thumbnail_url.as_deref().unwrap_or("-")
    );
    let labels: Vec<&str> = video.delivery_types.iter().map(DeliveryType::label).collect();
    println!("{} {}", "Delivery types:".bold(), labels.join(", "));
    println!("{} {}", "Sequence:".bold(), video.sequence_order);
    println!("{} {}", "Mandatory:".bold(), video.is_mandatory);
    println!("{} {}", "Status:".bold(), active_label(video.is_active));
    println!(
        "{} {}",
        "Updated:".bold(),
        format_date(video.updated_at.as_deref())
    );
}
