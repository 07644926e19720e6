//! calctl CLI entry point.

use calctl_client::cli::events::EventsAction;
use calctl_client::cli::{Cli, Commands};
use calctl_client::confirm::ConfirmPolicy;
use calctl_client::output::{format_deleted, format_event};
use calctl_client::{commands, CalendarClient};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calctl_client=warn,calctl_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = CalendarClient::new(&cli.client_config())?;

    match cli.command {
        Commands::Events(events_cmd) => match events_cmd.action {
            EventsAction::Get {
                calendar_id,
                event_id,
            } => {
                let event = commands::get(&client, &calendar_id, &event_id).await?;
                println!("{}", format_event(&event, cli.format));
            }
            EventsAction::Create(args) => {
                let event = commands::create(&client, &args).await?;
                if !cli.quiet {
                    println!("{}", format_event(&event, cli.format));
                }
            }
            EventsAction::Update(args) => {
                let event = commands::update(&client, &args).await?;
                if !cli.quiet {
                    println!("{}", format_event(&event, cli.format));
                }
            }
            EventsAction::Delete(args) => {
                let policy = ConfirmPolicy::new(cli.force, cli.no_input);
                let outcome = commands::delete(&client, &args, policy).await?;
                if !cli.quiet {
                    println!("{}", format_deleted(&outcome, cli.format));
                }
            }
        },
    }

    Ok(())
}
