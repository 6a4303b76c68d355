//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, request span)
//!     → routing (parameter validation, handler dispatch)
//!     → gateway (upstream call, reshaping)
//!     → response.rs (error → status + JSON body)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::ErrorBody;
pub use server::{AppState, HttpServer};
