use anyhow::Context;
use webserv::config::Config;
use webserv::http::connection::Listener;
use webserv::proxy::{relay, Upstream};

fn usage(program: &str) -> ! {
    eprintln!("USAGE:  {program} <listen port> <upstream url>");
    std::process::exit(1);
}

/// Relays one client at a time until accepting fails.
async fn relay_forever(listener: &Listener, upstream: &Upstream) -> anyhow::Result<()> {
    loop {
        let conn = listener.accept().await?;
        if let Err(e) = relay(conn, upstream).await {
            tracing::warn!(error = %e, "relay failed");
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("relay");
    let [_, port, upstream] = args.as_slice() else {
        usage(program);
    };
    let Ok(port) = port.parse::<u16>() else {
        usage(program);
    };
    let upstream = Upstream::parse(upstream).context("bad upstream")?;

    webserv::init_tracing();

    let cfg = Config::load();
    let addr = cfg.listen_addr(port);
    let listener = Listener::bind(&addr)
        .await
        .with_context(|| format!("failed to listen on {addr}"))?;
    tracing::info!(%upstream, "Relaying {} to upstream", addr);

    tokio::select! {
        res = relay_forever(&listener, &upstream) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
