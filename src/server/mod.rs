//! Server module for building HTTP servers with auto-registered routes
//!
//! This module provides a `ServerBuilder` that registers:
//! - A `GET /{plural}` listing route per registered entity, accepting
//!   `page`, `size`, `direction`, `sort` and `filter` query parameters
//! - Health check routes

pub mod builder;
pub mod entity_registry;
pub mod handlers;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityRegistry, EntityRoutes, RouteDescriptor};
pub use handlers::{ListState, list, list_entities};

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins over `default_directive`. Returns false when a subscriber
/// was already installed.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
