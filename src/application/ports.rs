//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::application::config::Config;
use crate::domain::line::Line;
use crate::domain::theme::Theme;
use crate::domain::volume::{Blessing, Volume, VolumeSummary};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 콘텐츠 API 호출 실패 분류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound { message: Option<String> },
    #[error("unexpected status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// 서버가 envelope `message`로 내려준 사유.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { message } | ApiError::Status { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// 공개 콘텐츠 API 포트(읽기 위주, 평점/내보내기만 POST).
#[async_trait]
pub trait VolumeApi: Send + Sync {
    fn base_url(&self) -> &str;
    async fn random_blessing(&self) -> Result<Blessing, ApiError>;
    async fn latest_volume(&self) -> Result<Volume, ApiError>;
    async fn random_volume(&self) -> Result<Volume, ApiError>;
    async fn volume(&self, number: u32) -> Result<Volume, ApiError>;
    async fn search(&self, keyword: &str) -> Result<Vec<VolumeSummary>, ApiError>;
    async fn catalogue(&self) -> Result<Vec<VolumeSummary>, ApiError>;
    /// 성공 시 서버 메시지를 반환한다.
    async fn rate(&self, number: u32, rating: u8) -> Result<String, ApiError>;
    /// 범위 내 볼륨을 평문으로 내보낸 본문.
    async fn export(&self, start: u32, end: u32) -> Result<String, ApiError>;
}

/// 즐겨찾기 영속화 포트.
pub trait FavoritesStore: Send + Sync {
    fn load(&self) -> Result<BTreeSet<u32>>;
    fn save(&self, favorites: &BTreeSet<u32>) -> Result<()>;
}

/// 내보내기 결과 파일 기록 포트.
pub trait ExportWriter: Send + Sync {
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf>;
}

/// 스크롤백 출력 포트. 스타일은 호출 시점의 활성 테마로 해석한다.
pub trait Screen: Send {
    /// 새 라인(완성 라인 또는 빈 타이핑 라인)이 추가됨.
    fn append(&mut self, line: &Line, theme: &Theme);
    /// 타이핑 중인 마지막 라인의 텍스트가 바뀜.
    fn update(&mut self, line: &Line, theme: &Theme);
    fn clear(&mut self);
}
