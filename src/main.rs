use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use std::sync::Arc;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod models;
mod routes;
mod stats;
mod store;

use config::Config;
use store::{Store, memory::MemoryStore, mysql::MySqlStore};

use crate::docs::ApiDoc;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

/// Picks the storage backend. MySQL when `DATABASE_URL` is set, otherwise process memory.
/// Nothing here touches the database; the MySQL store connects on first use.
fn init_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    match &config.database_url {
        Some(url) => {
            let pool = db::init_db(url).context("invalid DATABASE_URL")?;
            Ok(Arc::new(MySqlStore::new(pool)))
        }
        None => {
            warn!("DATABASE_URL not set, attendance data is kept in memory only");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(addr = %config.server_addr, prefix = %config.api_prefix, "Server starting...");

    let store = init_store(&config)?;
    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::from(store.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(error::json_config())
            .configure(|cfg| routes::configure(cfg, &config))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn config_with(database_url: Option<&str>) -> Config {
        Config {
            server_addr: "127.0.0.1:0".into(),
            database_url: database_url.map(String::from),
            admin_key: "k".into(),
            api_prefix: "/api".into(),
            default_batch: "JNU MIT 1st Year".into(),
            log_dir: "logs".into(),
            log_level: Level::INFO,
        }
    }

    #[actix_web::test]
    async fn test_store_starts_without_reachable_database() {
        let config = config_with(Some("mysql://attendance@127.0.0.1:1/attendance"));
        assert!(init_store(&config).is_ok());
    }

    #[actix_web::test]
    async fn test_store_rejects_malformed_database_url() {
        let config = config_with(Some("not a url"));
        assert!(init_store(&config).is_err());
    }

    #[actix_web::test]
    async fn test_memory_store_without_database_url() {
        let store = init_store(&config_with(None)).unwrap();
        assert!(store.ping().await.is_ok());
    }
}
