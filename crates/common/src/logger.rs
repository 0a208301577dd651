use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "debug,reqwest=warn,hyper=warn,hyper_util=warn";

pub fn setup_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_ansi(true)
        .compact()
        .with_env_filter(filter)
        .init();
}
