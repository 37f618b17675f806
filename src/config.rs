use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Root of the publicly served tree; uploads land under
    /// `<public_dir>/uploads/`.
    pub public_dir: PathBuf,
    pub admin_access_code: String,
    /// Superadmin seeded at startup so the first login works without a
    /// signup round-trip.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env_string("CAMPUS_BIND_ADDR", "127.0.0.1:8080")
            .parse::<SocketAddr>()
            .context("CAMPUS_BIND_ADDR must be a valid host:port")?;

        let public_dir = PathBuf::from(env_string("CAMPUS_PUBLIC_DIR", "public"));
        let admin_access_code = env_string("CAMPUS_ADMIN_ACCESS_CODE", "campus@adm1n");

        let bootstrap_admin = match (
            std::env::var("CAMPUS_ADMIN_EMAIL"),
            std::env::var("CAMPUS_ADMIN_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) => Some(BootstrapAdmin { email, password }),
            _ => None,
        };

        Ok(Self {
            bind_addr,
            public_dir,
            admin_access_code,
            bootstrap_admin,
        })
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
