//! GatePass registration client
//!
//! Main application entry point
//!
//! ```text
//! gatepass [query]                                   load the page
//! gatepass register <event> <name> <student_id> <email>
//! ```

use std::sync::Arc;
use anyhow::Context;
use chrono::Utc;
use tracing::{error, info, warn};

use GatePass::{
    config::Settings,
    surface::{ResultAction, TerminalSurface},
    utils::logging,
    Page, RegistrationForm,
};

enum Command {
    Load { query: String },
    Register { form: RegistrationForm },
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    match args.first().map(String::as_str) {
        Some("register") => {
            let [event, name, student_id, email] = &args[1..] else {
                anyhow::bail!("usage: register <event> <name> <student_id> <email>");
            };
            Ok(Command::Register {
                form: RegistrationForm::new(Some(event.as_str()), name.as_str(), student_id.as_str(), email.as_str()),
            })
        }
        Some(query) => Ok(Command::Load {
            query: query.trim_start_matches('?').to_string(),
        }),
        None => Ok(Command::Load {
            query: std::env::var("GATEPASS_QUERY").unwrap_or_default(),
        }),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", GatePass::info());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    let surface = Arc::new(TerminalSurface::new());
    let page = Page::new(&settings, surface)?;

    for issue in page.services().health_check().get_issues() {
        warn!("Service issue: {}", issue);
    }

    match command {
        Command::Load { query } => {
            page.on_load(&query, Utc::now()).await;
            page.carousel().stop_auto_advance();
        }
        Command::Register { form } => {
            page.workflow().load_catalog(Utc::now()).await.ok();

            match page.workflow().submit(&form).await {
                Ok(outcome) => {
                    for action in &outcome.panel.actions {
                        if let ResultAction::DownloadIdCard { .. } = action {
                            match page.run_action(action).await {
                                Ok(path) => info!(path = %path.display(), "ID card saved"),
                                Err(e) => error!(error = %e, "ID card download failed"),
                            }
                        }
                    }
                }
                Err(e) => {
                    error!(error = %e, "Registration failed");
                    return Err(e.into());
                }
            }
        }
    }

    info!("GatePass client finished");
    Ok(())
}
