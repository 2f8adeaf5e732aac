use tracing_subscriber::EnvFilter;

/// Scoped tracing for tests: a thread-local subscriber writing through the test
/// harness capture, torn down when the guard drops. Keeps log output attached to
/// the owning test instead of interleaving across threads.
pub struct TestTracing {
    _guard: tracing::subscriber::DefaultGuard,
}

impl TestTracing {
    #[allow(dead_code)]
    pub fn init() -> Self {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        Self { _guard: guard }
    }
}
