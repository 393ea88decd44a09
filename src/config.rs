use crate::stats::StreakAnchor;
use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};
use tracing::warn;

pub const DEFAULT_DATA_PATH: &str = "task_logger_data.json";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub streak_anchor: StreakAnchor,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_path = lookup("TASKFLOW_DATA_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let host = match lookup("TASKFLOW_HOST") {
            Some(value) => value.trim().parse().unwrap_or_else(|err| {
                warn!(value = %value, "invalid TASKFLOW_HOST, using loopback: {err}");
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            }),
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let streak_anchor = match lookup("TASKFLOW_STREAK_ANCHOR") {
            Some(value) => StreakAnchor::parse(&value).unwrap_or_else(|| {
                warn!(value = %value, "unknown TASKFLOW_STREAK_ANCHOR, using latest");
                StreakAnchor::default()
            }),
            None => StreakAnchor::default(),
        };

        Self {
            data_path,
            host,
            port,
            streak_anchor,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
