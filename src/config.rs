// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup into an [`AppConfig`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SOLANA_NETWORK` | `devnet`, `testnet` or `mainnet-beta` | `devnet` |
//! | `SOLANA_RPC_URL` | Overrides the network's RPC endpoint | Network preset |
//! | `SOLANA_COMMITMENT` | `confirmed` or `finalized` | `confirmed` |
//! | `RPC_TIMEOUT_SECS` | Per-call RPC timeout | `30` |
//! | `VERIFY_TIMEOUT_SECS` | Deadline for one transfer verification | `60` |
//! | `TRANSFER_AMOUNT_CHECK` | `ignore`, `at_least` or `exact` | `ignore` |
//! | `KEYPAIR_DIR` / `KEYPAIR_NAME` | Authority keypair JSON file | Optional |
//! | `AUTHORITY_SECRET_KEY_BASE58` | Authority keypair, base58 | Optional |
//! | `AUTHORITY_SECRET_KEY_BASE64` | Authority keypair, base64 | Optional |
//! | `TLS_CERT_PATH` / `TLS_KEY_PATH` | PEM files to serve HTTPS | Plain HTTP |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{fmt, path::PathBuf, time::Duration};

use crate::{
    error::ServiceError,
    ledger::{
        keypair_from_base58, keypair_from_base64, network_by_name, read_keypair,
        rpc::DEFAULT_RPC_TIMEOUT, CommitmentLevel, Keypair, NetworkConfig, SOLANA_DEVNET,
    },
    verify::AmountCheck,
};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const NETWORK_ENV: &str = "SOLANA_NETWORK";
pub const RPC_URL_ENV: &str = "SOLANA_RPC_URL";
pub const COMMITMENT_ENV: &str = "SOLANA_COMMITMENT";
pub const RPC_TIMEOUT_ENV: &str = "RPC_TIMEOUT_SECS";
pub const VERIFY_TIMEOUT_ENV: &str = "VERIFY_TIMEOUT_SECS";
pub const AMOUNT_CHECK_ENV: &str = "TRANSFER_AMOUNT_CHECK";
pub const KEYPAIR_DIR_ENV: &str = "KEYPAIR_DIR";
pub const KEYPAIR_NAME_ENV: &str = "KEYPAIR_NAME";
pub const AUTHORITY_BASE58_ENV: &str = "AUTHORITY_SECRET_KEY_BASE58";
pub const AUTHORITY_BASE64_ENV: &str = "AUTHORITY_SECRET_KEY_BASE64";
pub const TLS_CERT_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_VERIFY_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("{0} must be set together with {1}")]
    Incomplete(&'static str, &'static str),
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        name,
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Where the authority keypair comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthoritySource {
    File { dir: PathBuf, name: String },
    Base58(String),
    Base64(String),
}

impl AuthoritySource {
    pub fn load(&self) -> Result<Keypair, ServiceError> {
        match self {
            AuthoritySource::File { dir, name } => read_keypair(dir, name),
            AuthoritySource::Base58(encoded) => keypair_from_base58(encoded),
            AuthoritySource::Base64(encoded) => keypair_from_base64(encoded),
        }
    }
}

impl fmt::Debug for AuthoritySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthoritySource::File { dir, name } => f
                .debug_struct("File")
                .field("dir", dir)
                .field("name", name)
                .finish(),
            AuthoritySource::Base58(_) => f.write_str("Base58(<redacted>)"),
            AuthoritySource::Base64(_) => f.write_str("Base64(<redacted>)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub network: NetworkConfig,
    pub rpc_url: String,
    pub commitment: CommitmentLevel,
    pub rpc_timeout: Duration,
    pub verify_timeout: Duration,
    pub amount_check: AmountCheck,
    pub authority: Option<AuthoritySource>,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            network: SOLANA_DEVNET,
            rpc_url: SOLANA_DEVNET.rpc_url.to_string(),
            commitment: CommitmentLevel::Confirmed,
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            verify_timeout: Duration::from_secs(DEFAULT_VERIFY_TIMEOUT_SECS),
            amount_check: AmountCheck::Ignore,
            authority: None,
            tls: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match var(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| invalid(PORT_ENV, format!("`{raw}` is not a port")))?,
            None => defaults.port,
        };

        let network = match var(NETWORK_ENV) {
            Some(raw) => network_by_name(&raw)
                .ok_or_else(|| invalid(NETWORK_ENV, format!("unknown network `{raw}`")))?,
            None => defaults.network,
        };
        let rpc_url = var(RPC_URL_ENV).unwrap_or_else(|| network.rpc_url.to_string());

        let commitment = match var(COMMITMENT_ENV) {
            Some(raw) => raw
                .parse::<CommitmentLevel>()
                .map_err(|e| invalid(COMMITMENT_ENV, e))?,
            None => defaults.commitment,
        };
        // Nodes do not serve transactions at `processed`.
        if commitment == CommitmentLevel::Processed {
            return Err(invalid(
                COMMITMENT_ENV,
                "must be `confirmed` or `finalized`",
            ));
        }

        let amount_check = match var(AMOUNT_CHECK_ENV) {
            Some(raw) => raw
                .parse::<AmountCheck>()
                .map_err(|e| invalid(AMOUNT_CHECK_ENV, e))?,
            None => defaults.amount_check,
        };

        let authority = match (
            var(KEYPAIR_DIR_ENV),
            var(KEYPAIR_NAME_ENV),
            var(AUTHORITY_BASE58_ENV),
            var(AUTHORITY_BASE64_ENV),
        ) {
            (Some(dir), Some(name), _, _) => Some(AuthoritySource::File {
                dir: PathBuf::from(dir),
                name,
            }),
            (Some(_), None, _, _) => {
                return Err(ConfigError::Incomplete(KEYPAIR_DIR_ENV, KEYPAIR_NAME_ENV))
            }
            (None, Some(_), _, _) => {
                return Err(ConfigError::Incomplete(KEYPAIR_NAME_ENV, KEYPAIR_DIR_ENV))
            }
            (None, None, Some(encoded), _) => Some(AuthoritySource::Base58(encoded)),
            (None, None, None, Some(encoded)) => Some(AuthoritySource::Base64(encoded)),
            (None, None, None, None) => None,
        };

        let tls = match (var(TLS_CERT_ENV), var(TLS_KEY_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: PathBuf::from(cert),
                key: PathBuf::from(key),
            }),
            (Some(_), None) => return Err(ConfigError::Incomplete(TLS_CERT_ENV, TLS_KEY_ENV)),
            (None, Some(_)) => return Err(ConfigError::Incomplete(TLS_KEY_ENV, TLS_CERT_ENV)),
            (None, None) => None,
        };

        let log_format = match var(LOG_FORMAT_ENV).map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" => LogFormat::Json,
            Some(v) if v == "pretty" => LogFormat::Pretty,
            Some(v) => return Err(invalid(LOG_FORMAT_ENV, format!("unknown format `{v}`"))),
            None => defaults.log_format,
        };

        Ok(Self {
            host: var(HOST_ENV).unwrap_or(defaults.host),
            port,
            network,
            rpc_url,
            commitment,
            rpc_timeout: parse_secs(&var, RPC_TIMEOUT_ENV, defaults.rpc_timeout)?,
            verify_timeout: parse_secs(&var, VERIFY_TIMEOUT_ENV, defaults.verify_timeout)?,
            amount_check,
            authority,
            tls,
            log_format,
        })
    }
}

fn parse_secs(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match var(name) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(invalid(name, format!("`{raw}` is not a positive number of seconds"))),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_target_devnet() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.network.name, "devnet");
        assert_eq!(config.rpc_url, "https://api.devnet.solana.com");
        assert_eq!(config.commitment, CommitmentLevel::Confirmed);
        assert_eq!(config.amount_check, AmountCheck::Ignore);
        assert!(config.authority.is_none());
        assert!(config.tls.is_none());
    }

    #[test]
    fn rpc_url_overrides_network_preset() {
        let config = load(&[
            (NETWORK_ENV, "mainnet-beta"),
            (RPC_URL_ENV, "http://127.0.0.1:8899"),
        ])
        .unwrap();
        assert_eq!(config.network.name, "mainnet-beta");
        assert_eq!(config.rpc_url, "http://127.0.0.1:8899");
    }

    #[test]
    fn processed_commitment_is_rejected() {
        assert!(load(&[(COMMITMENT_ENV, "processed")]).is_err());
        let config = load(&[(COMMITMENT_ENV, "finalized")]).unwrap();
        assert_eq!(config.commitment, CommitmentLevel::Finalized);
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(load(&[(PORT_ENV, "http")]).is_err());
        assert!(load(&[(NETWORK_ENV, "localnet")]).is_err());
        assert!(load(&[(RPC_TIMEOUT_ENV, "0")]).is_err());
        assert!(load(&[(AMOUNT_CHECK_ENV, "maybe")]).is_err());
        assert!(load(&[(LOG_FORMAT_ENV, "xml")]).is_err());
    }

    #[test]
    fn authority_sources_are_exclusive_in_order() {
        let config = load(&[
            (KEYPAIR_DIR_ENV, "/keys"),
            (KEYPAIR_NAME_ENV, "admin.json"),
            (AUTHORITY_BASE58_ENV, "abc"),
        ])
        .unwrap();
        assert_eq!(
            config.authority,
            Some(AuthoritySource::File {
                dir: PathBuf::from("/keys"),
                name: "admin.json".to_string()
            })
        );

        let config = load(&[(AUTHORITY_BASE64_ENV, "AAAA")]).unwrap();
        assert_eq!(
            config.authority,
            Some(AuthoritySource::Base64("AAAA".to_string()))
        );

        assert!(matches!(
            load(&[(KEYPAIR_DIR_ENV, "/keys")]),
            Err(ConfigError::Incomplete(KEYPAIR_DIR_ENV, KEYPAIR_NAME_ENV))
        ));
    }

    #[test]
    fn authority_secrets_are_redacted() {
        let source = AuthoritySource::Base58("secret".to_string());
        assert_eq!(format!("{source:?}"), "Base58(<redacted>)");
    }

    #[test]
    fn tls_needs_both_paths() {
        assert!(load(&[(TLS_CERT_ENV, "/tls/cert.pem")]).is_err());
        let config = load(&[(TLS_CERT_ENV, "/tls/cert.pem"), (TLS_KEY_ENV, "/tls/key.pem")])
            .unwrap();
        assert_eq!(config.tls.unwrap().key, PathBuf::from("/tls/key.pem"));
    }
}
