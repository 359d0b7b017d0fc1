//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::build_router;
use crate::config::AppConfig;
use crate::core::service::DataService;
use crate::library::{Author, Book, LibraryRepository, build_registry, seed_data};
use crate::storage::InMemoryDataService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the library API server
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::from_yaml_file("config/library.yaml")?;
/// ServerBuilder::new()
///     .with_config(config)
///     .with_seed_data()
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    authors: Option<Arc<dyn DataService<Author>>>,
    books: Option<Arc<dyn DataService<Book>>>,
    seed: bool,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            authors: None,
            books: None,
            seed: false,
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the author storage (defaults to in-memory)
    pub fn with_author_service(mut self, service: impl DataService<Author> + 'static) -> Self {
        self.authors = Some(Arc::new(service));
        self
    }

    /// Set the book storage (defaults to in-memory)
    pub fn with_book_service(mut self, service: impl DataService<Book> + 'static) -> Self {
        self.books = Some(Arc::new(service));
        self
    }

    /// Populate the default in-memory stores with the bundled seed data
    ///
    /// Ignored for services supplied through `with_*_service`.
    pub fn with_seed_data(mut self) -> Self {
        self.seed = true;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build the shared handler state
    ///
    /// Fails when the configured mappings conflict with the built-in ones.
    pub fn build_state(mut self) -> Result<AppState> {
        self.config.validate()?;

        let registry = build_registry(&self.config.mappings)?;
        tracing::debug!(mappings = registry.len(), "property mappings registered");

        let (seed_authors, seed_books) = if self.seed {
            seed_data()
        } else {
            (Vec::new(), Vec::new())
        };

        let authors = self.authors.take().unwrap_or_else(|| {
            Arc::new(InMemoryDataService::with_entities(seed_authors))
                as Arc<dyn DataService<Author>>
        });
        let books = self.books.take().unwrap_or_else(|| {
            Arc::new(InMemoryDataService::with_entities(seed_books)) as Arc<dyn DataService<Book>>
        });

        let repository = LibraryRepository::new(authors, books, Arc::new(registry));

        Ok(AppState {
            repository: Arc::new(repository),
            paging: self.config.paging,
        })
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        Ok(build_router(self.build_state()?))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.bind` from the configuration and handles SIGTERM and
    /// SIGINT (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

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
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
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
    use crate::config::{MappingConfig, PropertyConfig};

    #[tokio::test]
    async fn test_build_state_seeds_in_memory_stores() {
        let state = ServerBuilder::new()
            .with_seed_data()
            .build_state()
            .expect("state should build");

        let author = state
            .repository
            .get_authors(&Default::default(), 10)
            .await
            .expect("listing should succeed");
        assert_eq!(author.total_count(), 6);
    }

    #[tokio::test]
    async fn test_build_state_without_seed_is_empty() {
        let state = ServerBuilder::default()
            .build_state()
            .expect("state should build");

        let page = state
            .repository
            .get_authors(&Default::default(), 10)
            .await
            .expect("listing should succeed");
        assert_eq!(page.total_count(), 0);
        assert_eq!(state.paging.default_page_size, 10);
    }

    #[test]
    fn test_build_state_rejects_duplicate_builtin_mapping() {
        let mut config = AppConfig::default();
        config.mappings.push(MappingConfig {
            source: "author_dto".to_string(),
            destination: "author".to_string(),
            properties: vec![PropertyConfig {
                name: "id".to_string(),
                storage: vec!["id".to_string()],
                revert: false,
            }],
        });

        let result = ServerBuilder::new().with_config(config).build_state();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_produces_router() {
        let router = ServerBuilder::new()
            .with_seed_data()
            .build()
            .expect("build should produce a Router");
        let _ = router;
    }
}
