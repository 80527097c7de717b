use anyhow::Context;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Install a global subscriber logging to stderr at `level`, unless
/// overridden by RUST_LOG. Subsequent calls leave the installed subscriber as-is.
pub fn init(level: &str) -> anyhow::Result<()> {
    let level: LevelFilter = level
        .parse()
        .with_context(|| format!("invalid log level {level:?}"))?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if let Err(err) = tracing_subscriber::fmt::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        tracing::debug!(%err, "logging was already initialized");
    }
    Ok(())
}
