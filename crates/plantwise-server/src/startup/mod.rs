//! Application startup: logging and the HTTP server

mod http;
mod logging;

pub use http::{configure_app, error_handlers, main_server};
pub use logging::{LogRotation, LoggingConfig, LoggingGuard, init_logging};
