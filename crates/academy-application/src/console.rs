//! Composition root of the admin client.
//!
//! [`AdminConsole::bootstrap`] wires paths, configuration, durable session
//! storage, the session store and the HTTP gateway once. Every screen-level
//! use case is then created from the console and shares the same session.

use crate::analytics_service::AnalyticsDashboard;
use crate::auth_usecase::AuthUseCase;
use crate::quiz_builder::QuizBuilder;
use crate::track_editor::{TrackEditor, TrackOverviewEntry, track_overview};
use crate::video_catalog::{VideoCatalog, VideoEditor};
use academy_core::Result;
use academy_core::config::AcademyConfig;
use academy_core::delivery::DeliveryType;
use academy_core::session::{SessionEvent, SessionStore};
use academy_infrastructure::{AcademyPaths, ConfigService, FileSessionStorage};
use academy_interaction::{
    AnalyticsApi, AuthApi, GatewayConfig, HttpGateway, QuizApi, TracksApi, VideosApi,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Start-up overrides.
#[derive(Debug, Clone, Default)]
pub struct ConsoleOptions {
    /// Replaces the platform directories (config, session, logs, exports).
    pub base_dir: Option<PathBuf>,
    /// Explicit config file; defaults to `config.toml` in the config dir.
    pub config_file: Option<PathBuf>,
    /// Highest-priority base URL, typically `--base-url`.
    pub base_url: Option<String>,
    /// Runtime `ACADEMY_API_BASE_URL`.
    pub env_base_url: Option<String>,
}

pub struct AdminConsole {
    paths: AcademyPaths,
    config_path: PathBuf,
    config: AcademyConfig,
    session: Arc<SessionStore>,
    gateway: Arc<HttpGateway>,
}

impl AdminConsole {
    pub fn bootstrap(options: ConsoleOptions) -> Result<Self> {
        let paths = AcademyPaths::new(options.base_dir.as_deref())?;
        let config_path = options
            .config_file
            .clone()
            .unwrap_or_else(|| paths.config_file());
        let config = ConfigService::new(config_path.clone()).get_config()?;

        let storage = Arc::new(FileSessionStorage::new(paths.session_dir()));
        let session = Arc::new(SessionStore::restore(storage)?);

        let base_url =
            config.resolve_base_url(options.base_url.as_deref(), options.env_base_url.as_deref());
        let mut gateway_config = GatewayConfig::new(base_url).with_source(config.api.source.clone());
        if let Some(secs) = config.api.timeout_secs {
            gateway_config = gateway_config.with_timeout(Duration::from_secs(secs));
        }
        let gateway = Arc::new(HttpGateway::new(gateway_config, session.clone())?);

        tracing::debug!(
            base_url = gateway.base_url(),
            authenticated = session.is_authenticated(),
            "Admin console ready"
        );

        Ok(Self {
            paths,
            config_path,
            config,
            session,
            gateway,
        })
    }

    pub fn paths(&self) -> &AcademyPaths {
        &self.paths
    }

    /// The config file that was read (it may not exist).
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config(&self) -> &AcademyConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        self.gateway.base_url()
    }

    /// Session transitions, including expiry after a 401.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.subscribe()
    }

    /// Configured export directory, or the platform default.
    pub fn export_dir(&self) -> &Path {
        self.config
            .export
            .directory
            .as_deref()
            .unwrap_or_else(|| self.paths.export_dir())
    }

    pub fn auth(&self) -> AuthUseCase {
        AuthUseCase::new(
            AuthApi::new(self.gateway.clone()),
            self.session.clone(),
            self.config.auth.allowed_roles.clone(),
        )
    }

    pub fn videos_api(&self) -> VideosApi {
        VideosApi::new(self.gateway.clone())
    }

    pub fn video_catalog(&self) -> VideoCatalog {
        VideoCatalog::new(self.videos_api())
    }

    pub fn new_video(&self) -> VideoEditor {
        VideoEditor::create(self.videos_api())
    }

    pub async fn edit_video(&self, id: u64) -> Result<VideoEditor> {
        VideoEditor::edit(self.videos_api(), id).await
    }

    pub fn quiz_builder(&self, video_id: u64) -> QuizBuilder {
        QuizBuilder::new(QuizApi::new(self.gateway.clone()), self.videos_api(), video_id)
    }

    pub fn track_editor(&self, delivery_type: DeliveryType) -> TrackEditor {
        TrackEditor::new(TracksApi::new(self.gateway.clone()), delivery_type)
    }

    pub async fn tracks_overview(&self) -> Result<Vec<TrackOverviewEntry>> {
        track_overview(&TracksApi::new(self.gateway.clone())).await
    }

    pub fn analytics(&self) -> AnalyticsDashboard {
        AnalyticsDashboard::new(AnalyticsApi::new(self.gateway.clone()))
    }
}
