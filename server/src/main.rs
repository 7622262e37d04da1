use entrega_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = setup_environment()?;
    print_banner();

    tracing::info!(
        "Starting entrega-server v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    let state = ServerState::initialize(&config).await?;
    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
