//! Runtime configuration of a node taking part in federated agreement.

use std::time::Duration;

use anyerror::AnyError;
use clap::Parser;

use crate::config::errors::ConfigError;

/// The runtime configuration of an SCP node.
///
/// The defaults match the reference Stellar deployment: quorum sets are
/// checked with the basic structural rules only, and the round timeout grows
/// linearly by one second per round until it reaches 30 minutes.
///
/// A round timeout must be large enough for the nodes of a quorum to exchange
/// a few messages, while a long cap keeps a stalled network from flooding
/// itself with rounds. Raise `timeout_step_ms` on high latency links rather
/// than `max_timeout_secs`.
#[derive(Clone, Debug, Parser)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Config {
    /// Also reject quorum sets whose threshold at any level is smaller than
    /// the size of a v-blocking set at that level, i.e., thresholds below a
    /// simple majority.
    // clap 4 requires `num_args = 0..=1`, or it complains about missing arg
    // error https://github.com/clap-rs/clap/discussions/4374
    #[clap(long,
           default_value_t = false,
           action = clap::ArgAction::Set,
           num_args = 0..=1,
           default_missing_value = "true"
    )]
    pub extra_sanity_checks: bool,

    /// The amount of time in milliseconds added to the timeout for every
    /// round.
    #[clap(long, default_value = "1000")]
    pub timeout_step_ms: u64,

    /// The upper bound of a round timeout, in seconds.
    #[clap(long, default_value = "1800")]
    pub max_timeout_secs: u64,

    /// Whether this node votes.
    ///
    /// A watcher node tracks statements of others without its own statements
    /// counting toward anybody's slices.
    // clap 4 requires `num_args = 0..=1`, or it complains about missing arg
    // error https://github.com/clap-rs/clap/discussions/4374
    #[clap(long,
           default_value_t = true,
           action = clap::ArgAction::Set,
           num_args = 0..=1,
           default_missing_value = "true"
    )]
    pub is_validator: bool,
}

impl Default for Config {
    fn default() -> Self {
        <Self as Parser>::parse_from(Vec::<&'static str>::new())
    }
}

impl Config {
    /// Compute the timeout of the given round.
    ///
    /// It is a straight linear timeout: `round * timeout_step_ms`, capped at
    /// `max_timeout_secs`.
    pub fn round_timeout(&self, round: u32) -> Duration {
        let step = Duration::from_millis(self.timeout_step_ms);
        let max = Duration::from_secs(self.max_timeout_secs);

        step.saturating_mul(round).min(max)
    }

    /// Build a `Config` instance from a series of command line arguments.
    ///
    /// The first element in `args` must be the application name.
    pub fn build(args: &[&str]) -> Result<Config, ConfigError> {
        let config = <Self as Parser>::try_parse_from(args).map_err(|e| {
            ConfigError::ParseError {
                source: AnyError::from(&e),
                args: args.iter().map(|x| x.to_string()).collect(),
            }
        })?;
        config.validate()
    }

    /// Validate the state of this config.
    pub fn validate(self) -> Result<Config, ConfigError> {
        if self.timeout_step_ms == 0 {
            return Err(ConfigError::TimeoutStep);
        }

        if self.max_timeout_secs.saturating_mul(1000) < self.timeout_step_ms {
            return Err(ConfigError::MaxTimeout {
                max_timeout_secs: self.max_timeout_secs,
                timeout_step_ms: self.timeout_step_ms,
            });
        }

        Ok(self)
    }
}
