use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use axum::http::{HeaderValue, Method};
use jobboard_db::{DbConnectionConfig, DbConnectionError};
use tower_http::cors::{Any, CorsLayer};

const SQLITE_MEMORY_URLS: [&str; 2] = ["sqlite::memory:", "sqlite://:memory:"];

const DB_ENV_PREFIX: &str = "JOBBOARD";

/// Build database connection config from application config, then apply
/// `JOBBOARD_DB_*` pool tuning. In-memory databases ignore the tuning and
/// stay on one connection.
pub fn database_config_from_config(
    cfg: &jobboard_config::Config,
) -> Result<DbConnectionConfig, DbConnectionError> {
    let path = cfg.database.path.trim();
    if SQLITE_MEMORY_URLS.contains(&path) {
        tracing::warn!("using in-memory sqlite database; data is lost on exit");
        return Ok(DbConnectionConfig::in_memory());
    }
    let mut db_cfg = DbConnectionConfig::new(path);
    db_cfg.max_connections = cfg.database.max_connections;
    db_cfg.min_connections = db_cfg.min_connections.min(db_cfg.max_connections);
    db_cfg.with_env_overrides(DB_ENV_PREFIX)
}

/// `None` when no origin is allowed, which leaves CORS headers off entirely.
pub fn cors_layer_from_config(cfg: &jobboard_config::CorsConfig) -> Option<CorsLayer> {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if cfg.allow_all_origins {
        return Some(base.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = cfg
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unusable CORS origin");
                None
            }
        })
        .collect();
    if origins.is_empty() {
        return None;
    }
    Some(base.allow_origin(origins))
}

/// Parse host:port into a SocketAddr, with fallback to 0.0.0.0.
pub fn parse_bind_address(host: &str, port: u16) -> SocketAddr {
    host.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, port))
        .or_else(|_| host.parse::<SocketAddr>())
        .or_else(|_| host.parse::<Ipv6Addr>().map(|ip| SocketAddr::new(IpAddr::V6(ip), port)))
        .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], port)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_address_falls_back_to_any() {
        assert_eq!(
            parse_bind_address("127.0.0.1", 8080),
            SocketAddr::from(([127, 0, 0, 1], 8080))
        );
        assert_eq!(
            parse_bind_address("not-an-ip", 9000),
            SocketAddr::from(([0, 0, 0, 0], 9000))
        );
    }

    #[test]
    fn memory_database_uses_single_connection() {
        let mut cfg = jobboard_config::Config::default();
        cfg.database.path = "sqlite::memory:".into();
        let db = database_config_from_config(&cfg).unwrap();
        assert_eq!(db.max_connections, 1);

        cfg.database.path = "sqlite://data/jobs.sqlite".into();
        cfg.database.max_connections = 4;
        let db = database_config_from_config(&cfg).unwrap();
        assert_eq!(db.url, "sqlite://data/jobs.sqlite");
        assert_eq!(db.max_connections, 4);
    }

    #[test]
    fn cors_disabled_without_origins() {
        let cfg = jobboard_config::Config::default().cors;
        assert!(cfg.allowed_origins.is_empty());
        assert!(cors_layer_from_config(&cfg).is_none());

        let cfg = jobboard_config::CorsConfig {
            allowed_origins: vec!["https://jobs.example.com".into()],
            allow_all_origins: false,
        };
        assert!(cors_layer_from_config(&cfg).is_some());
    }
}
