use lazy_static::lazy_static;
use tracing_subscriber::EnvFilter;

lazy_static! {
    static ref UT_TRACING: () = install_ut_tracing();
}

/// Send the log of unit tests to the test output, honoring `RUST_LOG`.
///
/// The subscriber is installed once per test binary, every test may call it.
pub(crate) fn init_ut_tracing() {
    lazy_static::initialize(&UT_TRACING);
}

fn install_ut_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use crate::testing::init_ut_tracing;

    #[test]
    fn test_init_ut_tracing_twice() -> anyhow::Result<()> {
        init_ut_tracing();
        init_ut_tracing();

        assert!(tracing::dispatcher::has_been_set());
        tracing::debug!("logged after init_ut_tracing");

        Ok(())
    }
}
