//! API Client
//!
//! Bindings to the DIYDash REST backend, organized by resource.

mod client;
mod error;
mod media;
mod projects;
mod supplies;
mod tasks;
mod transport;


pub use client::{encode_component, ApiClient, RequestOptions};
pub use error::{ApiError, ErrorKind, GENERIC_MESSAGE};
pub use media::{NewPicture, NewVideo, PictureSource, VideoSource};
pub use projects::{ImageSource, NewProject, ProjectPatch};
pub use supplies::{toggle_purchased, upsert_reference};
pub use tasks::{toggle_completed, NewTask};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport};

use crate::config::Config;

/// Client for the configured backend
///
/// Cheap to build; components create one per action.
pub fn client() -> ApiClient<HttpTransport> {
    ApiClient::from_config(&Config::from_env())
}
