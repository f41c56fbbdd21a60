//! Application layer for the academy admin client.
//!
//! Use cases own the local state of one screen each (video list, quiz
//! builder, track editor, analytics dashboard) and coordinate the domain
//! rules in `academy-core` with the HTTP modules in `academy-interaction`.
//! [`AdminConsole`] is the composition root that creates them.

pub mod analytics_service;
pub mod auth_usecase;
pub mod console;
pub mod quiz_builder;
pub mod track_editor;
pub mod video_catalog;
pub mod view_scope;

pub use analytics_service::{AnalyticsDashboard, RIDER_PAGE_SIZE};
pub use auth_usecase::AuthUseCase;
pub use console::{AdminConsole, ConsoleOptions};
pub use quiz_builder::QuizBuilder;
pub use track_editor::{TrackEditor, TrackOverviewEntry, track_overview};
pub use video_catalog::{VIDEO_PAGE_SIZE, VideoCatalog, VideoEditor};
pub use view_scope::{ScopeHandle, ViewScope};
