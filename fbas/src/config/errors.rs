use anyerror::AnyError;

/// Error variants related to configuration.
#[derive(Debug, thiserror::Error)]
#[derive(PartialEq, Eq)]
pub enum ConfigError {
    #[error("ParseError: {source} while parsing ({args:?})")]
    ParseError { source: AnyError, args: Vec<String> },

    /// A round timeout can not grow if each round adds nothing.
    #[error("timeout_step_ms must be > 0")]
    TimeoutStep,

    #[error("max_timeout_secs({max_timeout_secs}) must be >= timeout step({timeout_step_ms} ms)")]
    MaxTimeout {
        max_timeout_secs: u64,
        timeout_step_ms: u64,
    },
}
