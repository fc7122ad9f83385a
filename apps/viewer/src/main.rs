use std::sync::Arc;
use dotenv::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use appointment_cell::render::render_view;
use appointment_cell::services::{
    AppointmentGateway, AppointmentView, HttpAppointmentGateway, InMemoryAppointmentStore,
};
use commands::{apply, parse_command, Command, HELP};
use shared_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Logs go to stderr so they don't interleave with the rendered view
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();

    let gateway: Arc<dyn AppointmentGateway> = if config.is_configured() {
        info!("Using appointment service at {}", config.appointment_service_url);
        Arc::new(HttpAppointmentGateway::new(&config))
    } else {
        warn!("No appointment service configured, using in-process demo data");
        Arc::new(InMemoryAppointmentStore::seeded())
    };

    let view = AppointmentView::with_system_clock(gateway);

    // Failures are recorded in the view state and shown in the render
    if let Err(e) = view.mount().await {
        warn!("Initial load failed: {}", e);
    }
    println!("{}", render_view(&view.snapshot()));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", HELP),
            Ok(command) => {
                if let Err(e) = apply(&view, command).await {
                    warn!("{}", e);
                }
                println!("{}", render_view(&view.snapshot()));
            }
            Err(e) => println!("{}\n{}", e, HELP),
        }
    }

    Ok(())
}
