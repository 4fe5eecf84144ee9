use tracing::Level;

/**
 * Installs the tracing subscriber with INFO as default level.
 * The level can be overridden through `RUST_LOG`, e.g. `RUST_LOG=pmvs=debug`.
 */
pub fn init_logger() {
    init_logger_with_level(Level::INFO)
}

pub fn init_logger_with_level(default_level: Level) {
    use tracing_subscriber::fmt::time::SystemTime;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_timer(SystemTime)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();
}
