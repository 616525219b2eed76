use tracing_subscriber::EnvFilter;
use worktrack::commands::Cli;
use worktrack::libs::messages::macros::is_debug_mode;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if is_debug_mode() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("worktrack=debug"));
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    }

    Cli::menu().await
}
