pub mod analytics;
pub mod auth;
pub mod config;
pub mod quiz;
pub mod tracks;
pub mod videos;

use academy_application::{AdminConsole, ScopeHandle};
use academy_core::ordering::MoveDirection;
use anyhow::{Result, bail};
use clap::ValueEnum;

/// Refuses to run a command that needs a session when there is none.
pub fn require_login(console: &AdminConsole) -> Result<()> {
    if !console.session().is_authenticated() {
        bail!("Not signed in. Run `academy login <phone>` first.");
    }
    Ok(())
}

/// Cancels `handle`'s requests on Ctrl-C.
pub fn cancel_on_interrupt(handle: ScopeHandle) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => MoveDirection::Up,
            Direction::Down => MoveDirection::Down,
        }
    }
}

/// Converts a 1-based position typed by the user into an index.
pub fn index_of(position: usize) -> Result<usize> {
    match position.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("Positions start at 1"),
    }
}

pub fn active_label(is_active: bool) -> colored::ColoredString {
    use colored::Colorize;
    if is_active {
        "active".green()
    } else {
        "inactive".bright_black()
    }
}
