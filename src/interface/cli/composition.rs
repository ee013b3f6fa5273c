//! 애플리케이션 조립(composition root) 모듈.

use anyhow::Result;
use tracing::{debug, warn};

use crate::application::config::ConfigOverrides;
use crate::application::ports::ConfigRepository;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::session::{SessionPorts, TerminalSession, TypewriterSettings};
use crate::domain::theme::ThemeRegistry;
use crate::infrastructure::adapters::{
    ConsoleScreen, DirectoryExportWriter, JsonConfigRepository, JsonFavoritesStore, ScreenMode,
};
use crate::infrastructure::config::storage_path;
use crate::infrastructure::content::HttpVolumeApi;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
        }
    }
}

impl AppComposition {
    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 설정을 읽어 터미널 세션을 조립한다.
    /// 평문 출력 모드에서는 애니메이션 지연을 두지 않는다.
    pub fn terminal_session(
        &self,
        overrides: &ConfigOverrides,
        mode: ScreenMode,
    ) -> Result<TerminalSession> {
        let mut config = self.config_repo.load()?;
        config.apply_overrides(overrides);

        let theme = config.theme().unwrap_or_else(|| {
            warn!(
                theme = config.terminal.theme.as_deref().unwrap_or_default(),
                "unknown theme; falling back to default"
            );
            ThemeRegistry::default_theme()
        });

        let api_base = config.api_base();
        let storage = storage_path(&config);
        debug!(%api_base, storage = %storage.display(), "composing terminal session");

        let typewriter = match mode {
            ScreenMode::Styled => config.typewriter(),
            ScreenMode::Plain => TypewriterSettings::instant(),
        };

        let ports = SessionPorts {
            api: Box::new(HttpVolumeApi::new(api_base, config.request_timeout())?),
            store: Box::new(JsonFavoritesStore::new(storage)),
            exporter: Box::new(DirectoryExportWriter::new(config.export_dir())),
            screen: Box::new(ConsoleScreen::stdout(mode)),
        };

        Ok(TerminalSession::new(ports, theme, typewriter))
    }
}
