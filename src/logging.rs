use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over the `info` default.
pub fn init_tracing() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // resolver details (malformed numbers etc.) are logged at `trace` under
            // `rsweb_pager::web`, e.g. "info,rsweb_pager::web=trace"
            "info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}
