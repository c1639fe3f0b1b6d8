//! Server configuration from flags and environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::DEFAULT_BODY_LIMIT;

#[derive(Debug, Clone, Parser)]
#[command(name = "baggage-server", version, about = "REST backend for client baggage records")]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "BAGGAGE_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory of the sled database. Records are kept in memory when unset.
    #[arg(long, env = "BAGGAGE_DATABASE")]
    pub database: Option<PathBuf>,

    /// Maximum request body size in bytes.
    #[arg(long, env = "BAGGAGE_BODY_LIMIT", default_value_t = DEFAULT_BODY_LIMIT)]
    pub body_limit: usize,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
