use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transit::api::routes::app;
use transit::cli::output::Output;
use transit::cli::{chat, commands, init, Cli, Commands};
use transit::otp::Departure;
use transit::{AppState, MemoryStore, TransitAgent, TransitConfig, TransitConfigManager};

/// Initialize the tracing subscriber; `RUST_LOG` wins over `default_level`.
///
/// Logs go to stderr so `ask --json` output stays machine-readable.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match run(cli, &output).await {
        Ok(code) => code,
        Err(e) => {
            output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, output: &Output) -> anyhow::Result<ExitCode> {
    let command = cli.command.unwrap_or(Commands::Chat);
    let verbose = cli.verbose;

    match command {
        Commands::Init { path, force } => {
            let result = init::run(init::InitConfig { path, force }, output);
            Ok(match result {
                init::InitResult::Success => ExitCode::SUCCESS,
                init::InitResult::AlreadyExists | init::InitResult::Error(_) => {
                    ExitCode::FAILURE
                }
            })
        }

        Commands::Config { validate } => {
            let source = if cli.config.exists() {
                cli.config.display().to_string()
            } else {
                format!("{} (not found, using defaults)", cli.config.display())
            };

            let config = TransitConfig::load(&cli.config)
                .with_context(|| format!("Invalid configuration in {}", cli.config.display()))?;
            init_tracing(log_level(verbose, &config));
            let warnings = config.validate_with_warnings()?;

            if !validate {
                commands::show_config(&config, &source, output);
            }
            for warning in &warnings {
                output.warning(&warning.to_string());
            }
            if validate {
                output.success("Configuration is valid");
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Serve {
            host,
            port,
            no_watch,
        } => {
            let manager = TransitConfigManager::new(&cli.config)
                .with_context(|| format!("Failed to load {}", cli.config.display()))?;
            let config = manager.config();
            init_tracing(log_level(verbose, &config));

            for warning in config.validate_with_warnings()? {
                warn!("{}", warning);
            }

            if !no_watch {
                if let Err(e) = manager.start_watching() {
                    warn!("Configuration hot reload disabled: {}", e);
                }
            }

            let manager = Arc::new(manager);
            let agent = Arc::new(TransitAgent::from_config(manager.clone())?);
            let state = AppState::new(agent);

            let addr = format!(
                "{}:{}",
                host.unwrap_or_else(|| config.server.host.clone()),
                port.unwrap_or(config.server.port)
            );
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;

            output.banner();
            output.success(&format!("Web interface: http://{}", addr));
            output.info(&format!("OpenAPI document: http://{}/api/openapi.json", addr));
            info!(addr = %addr, "Server listening");

            axum::serve(listener, app(state))
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            manager.stop_watching();
            info!("Server stopped");
            Ok(ExitCode::SUCCESS)
        }

        Commands::Memory(memory_command) => {
            let manager = TransitConfigManager::new(&cli.config)?;
            let config = manager.config();
            init_tracing(log_level(verbose, &config));
            let store = MemoryStore::from_config(&config.memory);
            commands::memory(&store, memory_command, config.memory.retention_days, output)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Chat => {
            let agent = build_agent(&cli.config, verbose)?;
            chat::run(&agent, output).await;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Ask { query, json, depart, date } => {
            let agent = build_agent(&cli.config, verbose)?;
            let departure = Departure { date, time: depart };
            let answered = commands::ask(&agent, &query.join(" "), departure, json, output).await?;
            Ok(if answered {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }

        Commands::Status => {
            let agent = build_agent(&cli.config, verbose)?;
            commands::status(&agent, output).await;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Geocode { name } => {
            let agent = build_agent(&cli.config, verbose)?;
            Ok(if commands::geocode(&agent, &name.join(" "), output) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Stops { query, limit } => {
            let agent = build_agent(&cli.config, verbose)?;
            commands::stops(&agent, query.as_deref(), limit, output);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// `--verbose` wins over the configured `server.log_level`
fn log_level(verbose: bool, config: &TransitConfig) -> &str {
    if verbose {
        "debug"
    } else {
        config.server.log_level.as_str()
    }
}

fn build_agent(config_path: &Path, verbose: bool) -> anyhow::Result<TransitAgent> {
    let manager = TransitConfigManager::new(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    init_tracing(log_level(verbose, &manager.config()));
    Ok(TransitAgent::from_config(Arc::new(manager))?)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
