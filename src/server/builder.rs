//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::{EntityRegistry, EntityRoutes};
use super::handlers::health_check;
use crate::config::QueryConfig;
use crate::core::entity::Entity;
use crate::storage::EntityRepository;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for creating HTTP servers with auto-registered listing routes
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .register::<Person>(InMemoryRepository::new())
///     .build();
/// ```
pub struct ServerBuilder {
    config: QueryConfig,
    entity_registry: EntityRegistry,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: QueryConfig::default(),
            entity_registry: EntityRegistry::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Replace the configuration (pagination limits, listen address)
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for routes outside the listing pattern, such as detail
    /// endpoints or webhooks.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Expose `GET /{plural}` for `E`, backed by `repository`
    pub fn register<E: Entity + Serialize>(
        mut self,
        repository: impl EntityRepository<E> + 'static,
    ) -> Self {
        let repository: Arc<dyn EntityRepository<E>> = Arc::new(repository);
        tracing::debug!(
            entity = E::resource_name_singular(),
            backend = repository.backend(),
            "registered entity routes"
        );
        self.entity_registry
            .register(Box::new(EntityRoutes::new(repository)));
        self
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Build the router: health routes, entity routes, then custom routes
    pub fn build(self) -> Router {
        let mut app = Router::new()
            .route("/health", get(health_check))
            .route("/healthz", get(health_check))
            .merge(self.entity_registry.build_routes(&self.config.pagination));

        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        app.layer(TraceLayer::new_for_http())
    }

    /// Serve on the configured address with graceful shutdown
    pub async fn serve_configured(self) -> Result<()> {
        let addr = self.config.server.address.to_string();
        self.serve(&addr).await
    }

    /// Serve the application with graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .register::<Person>(repository)
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaginationConfig;
    use crate::entities::Role;
    use crate::storage::InMemoryRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_status(router: Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    fn roles() -> InMemoryRepository<Role> {
        InMemoryRepository::with_entities(vec![Role::new("admin".to_string(), None)])
    }

    #[test]
    fn test_default_is_same_as_new() {
        let builder = ServerBuilder::default();
        assert_eq!(builder.config(), &QueryConfig::default());
    }

    #[tokio::test]
    async fn test_health_routes() {
        let router = ServerBuilder::new().build();
        assert_eq!(get_status(router.clone(), "/health").await, StatusCode::OK);
        assert_eq!(get_status(router, "/healthz").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_registered_entity_is_listed() {
        let router = ServerBuilder::new().register::<Role>(roles()).build();
        assert_eq!(get_status(router.clone(), "/roles").await, StatusCode::OK);
        assert_eq!(get_status(router, "/people").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_filter_is_bad_request() {
        let router = ServerBuilder::new().register::<Role>(roles()).build();
        let status = get_status(router, "/roles?filter=not-json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_config_limits_page_size() {
        let config = QueryConfig {
            pagination: PaginationConfig {
                default_page_size: 2,
                max_page_size: 5,
            },
            ..Default::default()
        };
        let router = ServerBuilder::new()
            .with_config(config)
            .register::<Role>(roles())
            .build();
        assert_eq!(get_status(router.clone(), "/roles?size=5").await, StatusCode::OK);
        assert_eq!(
            get_status(router, "/roles?size=6").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_build_with_custom_routes() {
        let custom = Router::new().route("/custom", get(|| async { "ok" }));
        let router = ServerBuilder::new().with_custom_routes(custom).build();
        assert_eq!(get_status(router, "/custom").await, StatusCode::OK);
    }
}
