//! `abelterm` 바이너리 진입점.

use abelterm::interface::cli::{AppComposition, Cli, CliAction, RawModeStderr, run_repl};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(RawModeStderr::default)
        .init();

    let action = Cli::parse_action();
    let composition = AppComposition::default();

    match action {
        CliAction::InspectConfig => match composition.inspect_config_usecase().execute() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        },
        CliAction::Interactive(overrides) => {
            if let Err(err) = run_repl(&composition, &overrides).await {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}
