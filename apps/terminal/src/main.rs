use std::{io::Stdout, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpActivitiesApi, SignupController, StatusBoard};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod session;
mod terminal_view;

use commands::{resolve_selection, Command, CommandError, HELP_TEXT};
use config::load_settings;
use session::{run_one_shot, PendingSubmissions};
use terminal_view::{TerminalForm, TerminalView};

#[derive(Parser, Debug)]
#[command(about = "Browse activities and sign up from the terminal")]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    status_display_ms: Option<u64>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Submit one signup after the initial load, then exit once the status clears.
    #[arg(long)]
    email: Option<String>,
    #[arg(long, requires = "email")]
    activity: Option<String>,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    settings.apply_overrides(args.server_url.clone(), args.status_display_ms);
    init_tracing(&settings.log_filter);

    let api = HttpActivitiesApi::from_server_url(&settings.server_url)
        .with_context(|| format!("cannot use server url '{}'", settings.server_url))?;
    info!(server_url = %api.base_url(), "starting activity signup terminal");

    let view = Arc::new(TerminalView::new(std::io::stdout()));
    let form = Arc::new(TerminalForm::default());
    let status = StatusBoard::with_window(view.clone(), settings.status_display());
    let controller = SignupController::new(Arc::new(api), view.clone(), form.clone(), status);

    controller.load_and_render().await;

    if let Some(email) = args.email {
        let activity = args.activity.unwrap_or_default();
        return run_one_shot(&controller, &form, &email, &activity).await;
    }

    run_prompt(controller, view, form).await
}

async fn run_prompt(
    controller: Arc<SignupController>,
    view: Arc<TerminalView<Stdout>>,
    form: Arc<TerminalForm>,
) -> Result<()> {
    view.print(HELP_TEXT);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = PendingSubmissions::default();

    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(error) => {
                view.print(&error.to_string());
                continue;
            }
        };

        match command {
            Command::Email(email) => form.set_email(&email),
            Command::Select(selection) => match resolve_selection(&selection, &view.options()) {
                Some(activity) => form.select(&activity),
                None => view.print("no such activity; type 'show' to list options"),
            },
            Command::Submit => pending.track(controller.spawn_submit()),
            Command::Reload => {
                let _ = controller.spawn_load();
            }
            Command::Show => view.repaint(),
            Command::Help => view.print(HELP_TEXT),
            Command::Quit => break,
        }
    }

    if !pending.is_empty() {
        view.print(&format!("waiting for {} pending signup(s)", pending.len()));
        pending.drain().await;
    }

    info!("terminal session ended");
    Ok(())
}
