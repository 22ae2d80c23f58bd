//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, span)
//!     → handlers.rs (decode body, run race)
//!     → response.rs (200 winner / 204 / 400)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use handlers::CheckTextRequest;
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{FoundResponse, StatusBody};
pub use server::{AppState, HttpServer};
