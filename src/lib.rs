//! Nimbus weather gateway library.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::NimbusConfig;
pub use gateway::{Gateway, GatewayError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
