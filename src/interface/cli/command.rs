//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

use crate::application::config::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(name = "abelterm", version)]
#[command(about = "The Abel Experience™ terminal: read greentext volumes from your shell")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Content API base URL (a base ending in /api is pointed at /api/public)
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,

    /// Color theme to start with (see `themes` inside the terminal)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Print output immediately, without the typewriter effect
    #[arg(long)]
    instant: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and the paths that were searched
    Config,
}

#[derive(Debug)]
pub enum CliAction {
    Interactive(ConfigOverrides),
    InspectConfig,
}

impl Cli {
    /// 프로세스 인자를 해석한다. 잘못된 인자는 clap이 종료 코드 2로 처리한다.
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        match self.command {
            Some(Commands::Config) => CliAction::InspectConfig,
            None => CliAction::Interactive(ConfigOverrides {
                api_base: self.api_base.filter(|v| !v.trim().is_empty()),
                theme: self.theme.filter(|v| !v.trim().is_empty()),
                instant: self.instant,
            }),
        }
    }
}
