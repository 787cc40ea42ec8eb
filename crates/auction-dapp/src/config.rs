//! Configuration for the auction dapp.
//!
//! Everything comes from environment variables, falling back to
//! defaults suited to a local rollup node:
//!
//! - `ROLLUP_HTTP_SERVER_URL` (default: "http://127.0.0.1:5004")
//! - `AUCTION_BENEFICIARY`    (default: the zero address)
//! - `AUCTION_MIN_BID`        (default: "100")
//! - `AUCTION_THRESHOLD_MIN`  (default: "50")
//! - `AUCTION_THRESHOLD_MAX`  (default: "150")
//! - `AUCTION_THRESHOLD_SEED` (default: "0")
//! - `AUCTION_DURATION_SECS`  (default: "3600")
//! - `DAPP_REQUEST_TIMEOUT_MS` (default: "30000", connect and `/report` only)
//! - `DAPP_IDLE_DELAY_MS`     (default: "0")
//! - `DAPP_BACKOFF_BASE_MS`   (default: "500")
//! - `DAPP_BACKOFF_MAX_MS`    (default: "16000")
//! - `DAPP_MAX_RETRIES`       (default: "0", retry forever)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

use auction_core::{AuctionConfig, InvalidThresholdRange, SeededThreshold};

use crate::runner::RetryPolicy;

/// Dapp configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the rollup HTTP server.
    pub server_url: String,

    /// Account paid on settlement.
    pub beneficiary: String,

    /// Threshold in force until the first settlement.
    pub initial_threshold: u64,

    /// Inclusive range for threshold redraws.
    pub threshold_min: u64,
    pub threshold_max: u64,

    /// Seed for threshold redraws. Must match across all nodes.
    pub threshold_seed: u64,

    pub auction_duration_secs: u64,

    /// Bounds connection setup and `/report`. `/finish` waits as long
    /// as the coordinator needs.
    pub request_timeout: Duration,
    pub idle_delay: Duration,
    pub backoff_base: Duration,
    pub backoff_max: Duration,
    pub max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        let auction = AuctionConfig::default();
        let retry = RetryPolicy::default();

        Config {
            server_url: "http://127.0.0.1:5004".to_string(),
            beneficiary: auction.beneficiary,
            initial_threshold: auction.initial_threshold,
            threshold_min: 50,
            threshold_max: 150,
            threshold_seed: 0,
            auction_duration_secs: auction.auction_duration_secs,
            request_timeout: Duration::from_secs(30),
            idle_delay: retry.idle_delay,
            backoff_base: retry.backoff_base,
            backoff_max: retry.backoff_max,
            max_retries: retry.max_retries,
        }
    }
}

impl Config {
    /// Construct a `Config` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construct a `Config` from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let server_url = lookup("ROLLUP_HTTP_SERVER_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.server_url);
        ensure!(!server_url.is_empty(), "ROLLUP_HTTP_SERVER_URL must not be empty");

        let beneficiary = lookup("AUCTION_BENEFICIARY")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.beneficiary);
        ensure!(!beneficiary.is_empty(), "AUCTION_BENEFICIARY must not be empty");

        let config = Config {
            server_url,
            beneficiary,
            initial_threshold: read_or_default(&lookup, "AUCTION_MIN_BID", defaults.initial_threshold)?,
            threshold_min: read_or_default(&lookup, "AUCTION_THRESHOLD_MIN", defaults.threshold_min)?,
            threshold_max: read_or_default(&lookup, "AUCTION_THRESHOLD_MAX", defaults.threshold_max)?,
            threshold_seed: read_or_default(&lookup, "AUCTION_THRESHOLD_SEED", defaults.threshold_seed)?,
            auction_duration_secs: read_or_default(
                &lookup,
                "AUCTION_DURATION_SECS",
                defaults.auction_duration_secs,
            )?,
            request_timeout: read_millis(&lookup, "DAPP_REQUEST_TIMEOUT_MS", defaults.request_timeout)?,
            idle_delay: read_millis(&lookup, "DAPP_IDLE_DELAY_MS", defaults.idle_delay)?,
            backoff_base: read_millis(&lookup, "DAPP_BACKOFF_BASE_MS", defaults.backoff_base)?,
            backoff_max: read_millis(&lookup, "DAPP_BACKOFF_MAX_MS", defaults.backoff_max)?,
            max_retries: read_or_default(&lookup, "DAPP_MAX_RETRIES", defaults.max_retries)?,
        };

        ensure!(
            config.threshold_min <= config.threshold_max,
            "AUCTION_THRESHOLD_MIN ({}) must not exceed AUCTION_THRESHOLD_MAX ({})",
            config.threshold_min,
            config.threshold_max
        );
        ensure!(
            !config.request_timeout.is_zero(),
            "DAPP_REQUEST_TIMEOUT_MS must be greater than zero"
        );

        Ok(config)
    }

    pub fn auction_config(&self) -> AuctionConfig {
        AuctionConfig {
            beneficiary: self.beneficiary.clone(),
            initial_threshold: self.initial_threshold,
            auction_duration_secs: self.auction_duration_secs,
        }
    }

    pub fn threshold_source(&self) -> Result<SeededThreshold, InvalidThresholdRange> {
        SeededThreshold::new(self.threshold_min, self.threshold_max, self.threshold_seed)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            idle_delay: self.idle_delay,
            backoff_base: self.backoff_base,
            backoff_max: self.backoff_max,
            max_retries: self.max_retries,
        }
    }
}

fn read_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: {:?}", key, val)),
        None => Ok(default),
    }
}

fn read_millis<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    read_or_default(lookup, key, default_ms).map(Duration::from_millis)
}
