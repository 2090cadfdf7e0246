//! # config — read settings from environment variables

use std::net::SocketAddr;

use anyhow::Context;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_ADMIN_ROLE: &str = "ROLE_ADMIN";

#[derive(Debug, Clone)]
pub struct Config {
    /// Address Axum listens on
    pub bind_addr: SocketAddr,
    /// Role required to list foos
    pub admin_role: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address, e.g. 0.0.0.0:3000")?;

        let admin_role = lookup("FOO_ADMIN_ROLE")
            .filter(|role| !role.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_ROLE.to_string());

        Ok(Self { bind_addr, admin_role })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            admin_role: DEFAULT_ADMIN_ROLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.admin_role, "ROLE_ADMIN");
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("FOO_ADMIN_ROLE", "ROLE_OPS"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.admin_role, "ROLE_OPS");
    }

    #[test]
    fn blank_role_falls_back_to_default() {
        let config = Config::from_lookup(lookup(&[("FOO_ADMIN_ROLE", "  ")])).unwrap();
        assert_eq!(config.admin_role, "ROLE_ADMIN");
    }

    #[test]
    fn bad_bind_addr_is_an_error() {
        let err = Config::from_lookup(lookup(&[("BIND_ADDR", "nowhere")])).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR"));
    }
}
