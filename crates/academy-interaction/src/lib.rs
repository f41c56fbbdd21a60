//! HTTP access to the academy admin backend.
//!
//! - `gateway`: the shared `reqwest` client, auth headers and 401 handling
//! - `*_api`: one thin module per backend resource

pub mod analytics_api;
pub mod auth_api;
pub mod gateway;
pub mod quiz_api;
pub mod tracks_api;
pub mod upload;
pub mod videos_api;

pub use analytics_api::AnalyticsApi;
pub use auth_api::AuthApi;
pub use gateway::{AUTH_TOKEN_HEADER, GatewayConfig, HttpGateway, SOURCE_HEADER};
pub use quiz_api::QuizApi;
pub use tracks_api::TracksApi;
pub use upload::UploadFile;
pub use videos_api::VideosApi;
