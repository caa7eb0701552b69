use tokio::net::TcpListener;
use todo_core::TodoService;
use todo_server::config::StoreBackend;
use todo_server::ServerConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    init_tracing(config.log_json);

    match &config.store {
        StoreBackend::Memory => info!("using in-memory store"),
        StoreBackend::Sqlite { path, .. } => info!(path = %path.display(), "using sqlite store"),
    }
    let store = todo_server::open_store(&config.store)?;
    let app = todo_server::router(TodoService::new(store), &config.base_path);

    let listener = TcpListener::bind(config.bind).await?;
    info!(addr = %listener.local_addr()?, base_path = %config.base_path, "listening");
    todo_server::run(listener, app).await?;
    info!("server stopped");
    Ok(())
}
