use std::env;
use std::net::SocketAddr;

pub mod cors;

pub use cors::create_cors_layer;

pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/eventdesk".to_string()),
            bind_addr: env::var("BIND_ADDR")
                .ok()
                .and_then(|addr| addr.parse().ok())
                .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3001))),
        }
    }
}
