//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::storage_path;
use crate::application::config::Config;
use crate::domain::theme::ThemeRegistry;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub env_api_base: Option<String>,
    pub config: Config,
    pub effective: EffectiveSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub api_base: String,
    pub timeout_ms: u128,
    pub theme: String,
    pub theme_known: bool,
    pub storage_path: String,
    pub export_dir: String,
    pub base_delay_ms: u128,
    pub jitter_ms: u128,
    pub glitch_chance: f64,
    pub glitch_chars: String,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        let typewriter = config.typewriter();
        let theme = config
            .theme()
            .unwrap_or_else(ThemeRegistry::default_theme);

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            env_api_base: loaded.env_api_base.clone(),
            effective: EffectiveSettings {
                api_base: config.api_base(),
                timeout_ms: config.request_timeout().as_millis(),
                theme: theme.name.to_string(),
                theme_known: config.theme().is_some(),
                storage_path: storage_path(config).display().to_string(),
                export_dir: config.export_dir().display().to_string(),
                base_delay_ms: typewriter.base_delay.as_millis(),
                jitter_ms: typewriter.jitter.as_millis(),
                glitch_chance: typewriter.glitch_chance,
                glitch_chars: typewriter.glitch_chars.iter().collect(),
            },
            config: loaded.config,
        }
    }
}
