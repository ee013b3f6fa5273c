//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수/프로세스 접근은 `infrastructure`에서만 수행한다.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::application::usecases::session::TypewriterSettings;
use crate::domain::theme::{Theme, ThemeRegistry};

pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api/public";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_EXPORT_DIR: &str = ".";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 콘텐츠 API 접속 설정
    #[serde(default)]
    pub api: ApiConfig,
    /// 테마/저장소/내보내기 경로
    #[serde(default)]
    pub terminal: TerminalConfig,
    /// 타자기 효과 파라미터
    #[serde(default)]
    pub typewriter: TypewriterConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ApiConfig {
    /// 공개 API base URL (`/api`로 끝나면 `/api/public`으로 보정)
    pub base_url: Option<String>,
    /// 요청 타임아웃(ms)
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TerminalConfig {
    /// 시작 테마 이름
    pub theme: Option<String>,
    /// 즐겨찾기 key/value 저장 파일 경로
    pub storage_path: Option<String>,
    /// `export` 결과 파일 디렉터리
    pub export_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TypewriterConfig {
    pub base_delay_ms: Option<u64>,
    pub jitter_ms: Option<u64>,
    pub glitch_chance: Option<f64>,
    pub glitch_delay_ms: Option<u64>,
    pub glitch_chars: Option<String>,
    pub scramble_frame_ms: Option<u64>,
    pub scramble_pause_ms: Option<u64>,
}

/// CLI 인자 등 실행 시점 덮어쓰기 값.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base: Option<String>,
    pub theme: Option<String>,
    pub instant: bool,
}

impl Config {
    pub fn api_base(&self) -> String {
        normalize_api_base(self.api.base_url.as_deref().unwrap_or(DEFAULT_API_BASE))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.api.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    /// 설정된 테마를 해석한다. 알 수 없는 이름은 `None`.
    pub fn theme(&self) -> Option<&'static Theme> {
        match self.terminal.theme.as_deref() {
            Some(name) => ThemeRegistry::find(name),
            None => Some(ThemeRegistry::default_theme()),
        }
    }

    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(
            self.terminal
                .export_dir
                .as_deref()
                .unwrap_or(DEFAULT_EXPORT_DIR),
        )
    }

    pub fn typewriter(&self) -> TypewriterSettings {
        let defaults = TypewriterSettings::default();
        let cfg = &self.typewriter;
        TypewriterSettings {
            base_delay: cfg
                .base_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.base_delay),
            jitter: cfg
                .jitter_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.jitter),
            glitch_chance: cfg
                .glitch_chance
                .filter(|p| p.is_finite())
                .map(|p| p.clamp(0.0, 1.0))
                .unwrap_or(defaults.glitch_chance),
            glitch_delay: cfg
                .glitch_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.glitch_delay),
            glitch_chars: cfg
                .glitch_chars
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|s| s.chars().collect())
                .unwrap_or(defaults.glitch_chars),
            scramble_frame: cfg
                .scramble_frame_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.scramble_frame),
            scramble_pause: cfg
                .scramble_pause_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.scramble_pause),
        }
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub(crate) fn merge_from(&mut self, other: Config) {
        self.api.merge_from(other.api);
        self.terminal.merge_from(other.terminal);
        self.typewriter.merge_from(other.typewriter);
    }

    /// CLI 덮어쓰기를 마지막에 적용한다.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(base) = &overrides.api_base {
            self.api.base_url = Some(base.clone());
        }
        if let Some(theme) = &overrides.theme {
            self.terminal.theme = Some(theme.clone());
        }
        if overrides.instant {
            self.typewriter = TypewriterConfig {
                base_delay_ms: Some(0),
                jitter_ms: Some(0),
                glitch_chance: Some(0.0),
                glitch_delay_ms: Some(0),
                glitch_chars: self.typewriter.glitch_chars.take(),
                scramble_frame_ms: Some(0),
                scramble_pause_ms: Some(0),
            };
        }
    }
}

impl ApiConfig {
    pub(crate) fn merge_from(&mut self, other: ApiConfig) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.timeout_ms.is_some() {
            self.timeout_ms = other.timeout_ms;
        }
    }
}

impl TerminalConfig {
    pub(crate) fn merge_from(&mut self, other: TerminalConfig) {
        if other.theme.is_some() {
            self.theme = other.theme;
        }
        if other.storage_path.is_some() {
            self.storage_path = other.storage_path;
        }
        if other.export_dir.is_some() {
            self.export_dir = other.export_dir;
        }
    }
}

impl TypewriterConfig {
    pub(crate) fn merge_from(&mut self, other: TypewriterConfig) {
        if other.base_delay_ms.is_some() {
            self.base_delay_ms = other.base_delay_ms;
        }
        if other.jitter_ms.is_some() {
            self.jitter_ms = other.jitter_ms;
        }
        if other.glitch_chance.is_some() {
            self.glitch_chance = other.glitch_chance;
        }
        if other.glitch_delay_ms.is_some() {
            self.glitch_delay_ms = other.glitch_delay_ms;
        }
        if other.glitch_chars.is_some() {
            self.glitch_chars = other.glitch_chars;
        }
        if other.scramble_frame_ms.is_some() {
            self.scramble_frame_ms = other.scramble_frame_ms;
        }
        if other.scramble_pause_ms.is_some() {
            self.scramble_pause_ms = other.scramble_pause_ms;
        }
    }
}

/// `/api`로 끝나는 base는 공개 라우트(`/api/public`)로 보정하고 끝 슬래시를 제거한다.
pub fn normalize_api_base(raw: &str) -> String {
    let raw = raw.trim();
    let Ok(mut url) = Url::parse(raw) else {
        return raw.trim_end_matches('/').to_string();
    };

    let path = url.path().trim_end_matches('/').to_string();
    if path.ends_with("/api") {
        url.set_path(&format!("{path}/public"));
    } else {
        url.set_path(&path);
    }

    url.to_string().trim_end_matches('/').to_string()
}
