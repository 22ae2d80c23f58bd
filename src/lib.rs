//! Multi-site text search race with a small HTTP API.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod search;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use search::{RaceCoordinator, RaceResult, SearchRequest};
