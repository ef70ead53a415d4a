use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber, honouring `RUST_LOG` when set.
/// Calling it again (tests, repeated embedding) is a no-op.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wowzone=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
