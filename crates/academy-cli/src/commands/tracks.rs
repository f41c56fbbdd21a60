use super::{Direction, active_label, cancel_on_interrupt, index_of, require_login};
use academy_application::{AdminConsole, TrackEditor};
use academy_core::delivery::DeliveryType;
use academy_core::format::format_duration;
use academy_core::track::VideoSummary;
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

#[derive(Subcommand)]
pub enum TracksCommand {
    /// Summarize the track of every delivery type
    List,
    /// Show one track and the videos that can be added to it
    Show { delivery_type: DeliveryType },
    /// Append videos and save the track
    Add {
        delivery_type: DeliveryType,
        #[arg(required = true)]
        video_ids: Vec<u64>,
    },
    /// Remove videos and save the track
    Remove {
        delivery_type: DeliveryType,
        #[arg(required = true)]
        video_ids: Vec<u64>,
    },
    /// Move a video one place and save the track
    Move {
        delivery_type: DeliveryType,
        /// Position in the track, starting at 1
        position: usize,
        #[arg(value_enum)]
        direction: Direction,
    },
    /// Replace a track with a copy of another one
    Copy {
        #[arg(long)]
        from: DeliveryType,
        #[arg(long)]
        to: DeliveryType,
    },
    /// Deactivate a track
    Delete { delivery_type: DeliveryType },
}

pub async fn run(console: &AdminConsole, command: TracksCommand) -> Result<()> {
    require_login(console)?;
    match command {
        TracksCommand::List => {
            for entry in console.tracks_overview().await? {
                match &entry.track {
                    Some(track) => println!(
                        "{:<10} {:>3} videos  {:>7}  {}",
                        entry.delivery_type.label(),
                        entry.video_count(),
                        format_duration(track.total_duration_seconds() as f64),
                        active_label(track.is_active)
                    ),
                    None => println!(
                        "{:<10} {}",
                        entry.delivery_type.label(),
                        "not configured".bright_black()
                    ),
                }
            }
        }
        TracksCommand::Show { delivery_type } => {
            let editor = load(console, delivery_type).await?;
            print_track(&editor);
            let available = editor.available_for_selection();
            if !available.is_empty() {
                println!("{}", "Available:".bold());
                for video in available {
                    print_video(None, video);
                }
            }
        }
        TracksCommand::Add {
            delivery_type,
            video_ids,
        } => {
            let mut editor = load(console, delivery_type).await?;
            for id in video_ids {
                if !editor.add_video(id) {
                    eprintln!(
                        "{}",
                        format!("Video {id} is already in the track or not available").yellow()
                    );
                }
            }
            save(&mut editor).await?;
        }
        TracksCommand::Remove {
            delivery_type,
            video_ids,
        } => {
            let mut editor = load(console, delivery_type).await?;
            for id in video_ids {
                if !editor.remove_video(id) {
                    eprintln!("{}", format!("Video {id} is not in the track").yellow());
                }
            }
            save(&mut editor).await?;
        }
        TracksCommand::Move {
            delivery_type,
            position,
            direction,
        } => {
            let mut editor = load(console, delivery_type).await?;
            if editor.move_video(index_of(position)?, direction.into()) {
                save(&mut editor).await?;
            } else {
                println!("{}", "Nothing to move".bright_black());
            }
        }
        TracksCommand::Copy { from, to } => {
            let mut editor = console.track_editor(to);
            cancel_on_interrupt(editor.scope_handle());
            editor.copy_from(from).await?;
            println!(
                "{}",
                format!("Copied {} track to {}", from.label(), to.label()).green()
            );
            print_track(&editor);
        }
        TracksCommand::Delete { delivery_type } => {
            let mut editor = load(console, delivery_type).await?;
            editor.deactivate().await?;
            println!(
                "{}",
                format!("Deactivated {} track", delivery_type.label()).green()
            );
        }
    }
    Ok(())
}

async fn load(console: &AdminConsole, delivery_type: DeliveryType) -> Result<TrackEditor> {
    let mut editor = console.track_editor(delivery_type);
    cancel_on_interrupt(editor.scope_handle());
    editor.load().await?;
    Ok(editor)
}

async fn save(editor: &mut TrackEditor) -> Result<()> {
    if !editor.is_dirty() {
        println!("{}", "No changes".bright_black());
        return Ok(());
    }
    editor.save().await?;
    println!("{}", "Track saved".green());
    print_track(editor);
    Ok(())
}

fn print_track(editor: &TrackEditor) {
    println!("{}", editor.delivery_type().label().bold());
    if editor.videos.is_empty() {
        println!("{}", "  (no videos)".bright_black());
    }
    for video in &editor.videos {
        print_video(Some(video.sequence_order), video);
    }
}

fn print_video(position: Option<u32>, video: &VideoSummary) {
    let position = position.map_or_else(|| "-".to_string(), |p| p.to_string());
    println!(
        "{:>4}  {:>5}  {:<40} {}",
        position,
        video.id,
        video.title,
        format_duration(f64::from(video.duration_seconds))
    );
}
