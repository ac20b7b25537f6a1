//! REST backend for the users/products dashboard.
//!
//! `/api/users` and `/api/products` support list, create and delete;
//! `/health` reports liveness and store connectivity. Handlers hold no state
//! of their own: everything lives in the `DocumentStore` passed to `app`.

use std::future::Future;

use axum::{
    routing::{delete, get},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use config::Config;
pub use error::{ApiError, ErrorBody};
pub use models::{HealthReport, Product, Record, User};
pub use store::{Collection, DocumentStore, FileStore, MemoryStore, SharedStore, StoreError};

use routes::{create_record, delete_record, health, list_records, route_not_found};

pub fn app(store: SharedStore) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/users", get(list_records::<User>).post(create_record::<User>))
        .route("/users/{id}", delete(delete_record::<User>))
        .route("/products", get(list_records::<Product>).post(create_record::<Product>))
        .route("/products/{id}", delete(delete_record::<Product>));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

pub async fn run(
    listener: TcpListener,
    store: SharedStore,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}
