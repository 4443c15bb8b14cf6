use clap::Parser;
use krushi_pravah::cli::commands::{Cli, Commands, RatesAction};
use krushi_pravah::config::Settings;
use krushi_pravah::domain::entities::market_rate::{PredictedRate, RateUpdate};
use krushi_pravah::domain::error::DomainError;
use krushi_pravah::domain::values::language::LanguageForm;
use krushi_pravah::infrastructure::apmc::table::ColumnLayout;
use krushi_pravah::KrushiPravah;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Commands::Parse {
        layout: Some(layout),
        ..
    } = &cli.command
    {
        match layout.parse::<ColumnLayout>() {
            Ok(l) => settings.layout = l,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    let app = match KrushiPravah::new(&settings) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error initializing: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(app, &settings, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(
    app: KrushiPravah,
    settings: &Settings,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Rates {
            action: Some(action),
            ..
        } => {
            let stored = match action {
                RatesAction::Add { json } => {
                    let rate: PredictedRate = serde_json::from_str(&json)
                        .map_err(|e| DomainError::InvalidInput(format!("Invalid rate JSON: {e}")))?;
                    app.add_rate(rate)?
                }
                RatesAction::Update { id, json } => {
                    let update: RateUpdate = serde_json::from_str(&json).map_err(|e| {
                        DomainError::InvalidInput(format!("Invalid update JSON: {e}"))
                    })?;
                    app.update_rate(&id, update)?
                }
            };
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }
        Commands::Rates {
            action: None,
            live,
            mock,
        } => {
            let rates = if mock {
                app.mock_rates().await
            } else if live {
                app.live_rates().await?
            } else {
                app.current_rates().await
            };
            println!("{}", serde_json::to_string_pretty(&rates)?);
        }
        Commands::Serve { bind } => {
            let addr: SocketAddr = match bind {
                Some(b) => b.parse()?,
                None => settings.bind_addr,
            };
            krushi_pravah::http::serve(Arc::new(app), addr).await?;
        }
        Commands::Parse { file, .. } => {
            let html = std::fs::read_to_string(&file)?;
            let rates = app.parse_page(&html);
            if rates.is_empty() {
                return Err(format!("No rate table found in {}", file.display()).into());
            }
            println!("{}", serde_json::to_string_pretty(&rates)?);
        }
        Commands::Resolve { label, from } => {
            let form: LanguageForm = from.parse()?;
            let name = app.resolve(&label, form).await;
            println!("{}", serde_json::to_string_pretty(&name)?);
        }
        Commands::Cached => {
            let rates = app.cached_rates()?;
            println!("{}", serde_json::to_string_pretty(&rates)?);
        }
    }
    Ok(())
}
