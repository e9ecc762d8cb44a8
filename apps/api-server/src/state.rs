//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{AuthorRepository, PostRepository};
use quill_core::{AuthorService, PostService};
use quill_infra::InMemoryStore;

#[cfg(feature = "postgres")]
use quill_infra::{DatabaseConnections, PostgresAuthorRepository, PostgresPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authors: AuthorService,
    pub posts: PostService,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store
    /// when no database is configured or reachable.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        if config.run_migrations {
                            run_migrations(&connections).await;
                        }
                        return Self::postgres(Arc::new(connections));
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = config;
            tracing::info!("Running without postgres feature - using in-memory store");
        }

        Self::in_memory()
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::from_repositories(store.clone(), store)
    }

    /// State over arbitrary repositories; the store handle, if any, is not owned.
    pub fn from_repositories(
        authors: Arc<dyn AuthorRepository>,
        posts: Arc<dyn PostRepository>,
    ) -> Self {
        Self {
            authors: AuthorService::new(authors.clone(), posts.clone()),
            posts: PostService::new(posts, authors),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: Arc<DatabaseConnections>) -> Self {
        let authors = Arc::new(PostgresAuthorRepository::new(connections.main.clone()));
        let posts = Arc::new(PostgresPostRepository::new(connections.main.clone()));
        tracing::info!("Application state initialized (postgres)");

        Self {
            db: Some(connections),
            ..Self::from_repositories(authors, posts)
        }
    }

    /// `connected`, `unreachable` or `in-memory`.
    pub async fn database_status(&self) -> &'static str {
        #[cfg(feature = "postgres")]
        {
            if let Some(db) = &self.db {
                return match db.ping().await {
                    Ok(()) => "connected",
                    Err(e) => {
                        tracing::warn!(error = %e, "Database ping failed");
                        "unreachable"
                    }
                };
            }
        }

        "in-memory"
    }

    /// Release the store handle. Called once, after the HTTP server stops.
    pub async fn shutdown(&self) {
        #[cfg(feature = "postgres")]
        {
            if let Some(db) = &self.db {
                if let Err(e) = db.close().await {
                    tracing::error!(error = %e, "Failed to close database connection");
                }
            }
        }

        tracing::info!("Application state released");
    }
}

#[cfg(feature = "postgres")]
async fn run_migrations(connections: &DatabaseConnections) {
    use migration::MigratorTrait;

    match migration::Migrator::up(&connections.main, None).await {
        Ok(()) => tracing::info!("Database migrations applied"),
        Err(e) => tracing::error!(error = %e, "Database migrations failed"),
    }
}
