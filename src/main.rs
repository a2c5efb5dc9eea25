use anyhow::Context;
use webserv::config::{self, Config};
use webserv::http::connection::Listener;
use webserv::server::{handlers, Server};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let port = match config::parse_port_arg(std::env::args()) {
        Ok(port) => port,
        Err(usage) => {
            eprintln!("{usage}");
            std::process::exit(1);
        }
    };

    webserv::init_tracing();

    let cfg = Config::load();
    let addr = cfg.listen_addr(port);
    let listener = Listener::bind(&addr)
        .await
        .with_context(|| format!("failed to listen on {addr}"))?;
    tracing::info!("Listening on {}", addr);

    let router = handlers::default_router(cfg.max_routes, cfg.static_root.clone());
    let server = Server::new(router).with_poll_interval(cfg.poll_interval());

    tokio::select! {
        never = server.serve(&listener) => match never {},

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
