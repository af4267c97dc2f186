//! Session gate, HTTP gateway and resource services for the GTW admin console

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod gateway;
pub mod navigation;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use api::AdminApi;
pub use config::{AdminConfig, LoggingConfig};
pub use error::{Error, Result};
pub use gateway::AuthGateway;
pub use navigation::{Navigation, Navigator};
pub use session::{
    GuardOutcome, SessionContext, SessionOracle, SessionView, TokenStore, guard, sign_in,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Initialize the logging system
///
/// `RUST_LOG` overrides the configured level. Output goes to stderr so
/// command output on stdout stays machine readable.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.is_json() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    installed.map_err(|e| Error::Configuration {
        message: format!("Failed to initialize logging: {e}"),
    })
}
