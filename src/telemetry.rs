use tracing_subscriber::{EnvFilter, fmt};

/// Installs a fmt subscriber for hosts that do not bring their own.
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env.as_deref(), default_filter)?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

/// Uses `env` verbatim when it parses; otherwise `default_filter` with the
/// noisy dependency targets turned down.
fn build_filter(env: Option<&str>, default_filter: &str) -> anyhow::Result<EnvFilter> {
    if let Some(filter) = env.and_then(|env| EnvFilter::try_new(env).ok()) {
        return Ok(filter);
    }
    Ok(EnvFilter::try_new(default_filter)?
        .add_directive("sqlx=warn".parse()?)
        .add_directive("hyper=warn".parse()?))
}
