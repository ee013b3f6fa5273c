//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::config::Config;

/// 추가 설정 파일 경로(최우선 파일).
pub const CONFIG_ENV: &str = "ABELTERM_CONFIG";
/// 파일 설정보다 우선하는 API base.
pub const API_BASE_ENV: &str = "ABELTERM_API_BASE";

#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub config: Config,
    pub searched_paths: Vec<PathBuf>,
    pub loaded_paths: Vec<PathBuf>,
    pub env_api_base: Option<String>,
}

/// 우선순위 경로를 순회해 JSON 설정을 병합한 뒤 환경변수를 덮어쓴다.
pub(crate) fn load_merged_config() -> Result<LoadedConfig> {
    let env_api_base = env::var(API_BASE_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty());
    load_from(config_paths(), env_api_base)
}

pub(crate) fn load_from(paths: Vec<PathBuf>, env_api_base: Option<String>) -> Result<LoadedConfig> {
    // 낮은 우선순위에서 높은 우선순위 순서로 병합한다.
    let mut merged = Config::default();
    let mut loaded_paths = Vec::new();

    for path in &paths {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let parsed: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");
        merged.merge_from(parsed);
        loaded_paths.push(path.to_path_buf());
    }

    if let Some(base) = &env_api_base {
        merged.api.base_url = Some(base.clone());
    }

    Ok(LoadedConfig {
        config: merged,
        searched_paths: paths,
        loaded_paths,
        env_api_base,
    })
}

/// 시스템 + 사용자 + 프로젝트 + 명시 경로 순으로 병합 경로를 구성한다.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/abelterm/config.json")];

    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("abelterm").join("config.json"));
    }

    paths.push(PathBuf::from(".abelterm/config.json"));

    if let Ok(path) = env::var(CONFIG_ENV) {
        paths.push(Path::new(&path).to_path_buf());
    }

    dedup_paths(paths)
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}
