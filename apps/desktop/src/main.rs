use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{config::normalize_base_url, load_service_config, HttpEmployeeService};
use tracing::info;
use tracing_subscriber::EnvFilter;
use view_core::{dialog_channel, HostShell, Surface};

mod console;
mod dialogs;

use console::{next_line, parse_command, Command, ConsoleSurface};

#[derive(Parser, Debug)]
#[command(name = "employees", about = "Browse and edit employee records")]
struct Args {
    #[arg(long, default_value = "employees.toml")]
    config: PathBuf,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    customer_id: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = load_service_config(Some(&args.config))?;
    if let Some(base_url) = args.base_url {
        config.base_url = normalize_base_url(&base_url)?;
    }
    if let Some(customer_id) = args.customer_id {
        config.customer_id = customer_id;
    }
    if let Some(api_key) = args.api_key {
        config.api_key = api_key;
    }

    let service =
        Arc::new(HttpEmployeeService::new(&config).context("failed to build employee service")?);
    info!(base_url = %config.base_url, "employee service configured");

    let input = console::shared_stdin();
    let (dialogs, pending_rx) = dialog_channel();
    tokio::spawn(dialogs::run_presenter(pending_rx, input.clone()));

    let mut shell = HostShell::new(service, Arc::new(dialogs));
    let mut surface = ConsoleSurface::new();
    shell.start(&mut surface).await;

    while let Some(line) = next_line(&input).await? {
        let template = surface.view().template();
        match parse_command(template, surface.view().rows(), &line) {
            Ok(Command::Quit) => break,
            Ok(Command::Dispatch(ui_input)) => shell.dispatch(ui_input, &mut surface).await,
            Ok(Command::SetField(field, value)) => {
                surface.set_field(field, &value);
                surface.flush();
            }
            Ok(Command::ToggleStatus) => {
                let active = surface.status_toggle();
                surface.set_status_toggle(!active);
                surface.flush();
            }
            Ok(Command::Help) => println!("[{}]", console::help_text(template)),
            Err(message) => println!("{message} (type `help`)"),
        }
    }

    info!("bye");
    Ok(())
}
