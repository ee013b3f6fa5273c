//! 터미널 세션(명령 해석기) 유스케이스.
//!
//! 스크롤백/즐겨찾기/활성 테마는 세션 인스턴스의 필드이며,
//! 변경은 `submit`을 통해서만 일어난다.

mod gate;
mod handlers;
mod reveal;

use chrono::{DateTime, Local};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::application::ports::{ExportWriter, FavoritesStore, Screen, VolumeApi};
use crate::domain::command::parse_command;
use crate::domain::favorites::Favorites;
use crate::domain::line::{Line, Transcript};
use crate::domain::texts::welcome_lines;
use crate::domain::theme::Theme;

pub use gate::{BusyGuard, InputGate};
pub use reveal::{DEFAULT_GLITCH_CHARS, TypewriterSettings};

/// 세션이 사용하는 포트 묶음.
pub struct SessionPorts {
    pub api: Box<dyn VolumeApi>,
    pub store: Box<dyn FavoritesStore>,
    pub exporter: Box<dyn ExportWriter>,
    pub screen: Box<dyn Screen>,
}

/// 입력 한 줄 처리 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// 명령(또는 오류 안내)이 끝까지 출력됨.
    Completed,
    /// 빈 입력.
    Ignored,
    /// 이전 명령이 아직 출력 중이라 거부됨.
    Busy,
}

pub struct TerminalSession {
    api: Box<dyn VolumeApi>,
    store: Box<dyn FavoritesStore>,
    exporter: Box<dyn ExportWriter>,
    screen: Box<dyn Screen>,
    transcript: Transcript,
    favorites: Favorites,
    theme: &'static Theme,
    typewriter: TypewriterSettings,
    rng: StdRng,
    gate: InputGate,
    started_at: DateTime<Local>,
}

impl TerminalSession {
    /// 저장소에서 즐겨찾기를 읽어 세션을 만든다. 읽기 실패는 빈 집합으로 시작한다.
    pub fn new(ports: SessionPorts, theme: &'static Theme, typewriter: TypewriterSettings) -> Self {
        let favorites = match ports.store.load() {
            Ok(set) => Favorites::new(set),
            Err(err) => {
                warn!(error = %err, "failed to load favorites; starting empty");
                Favorites::default()
            }
        };

        Self {
            api: ports.api,
            store: ports.store,
            exporter: ports.exporter,
            screen: ports.screen,
            transcript: Transcript::new(),
            favorites,
            theme,
            typewriter,
            rng: StdRng::from_os_rng(),
            gate: InputGate::new(),
            started_at: Local::now(),
        }
    }

    /// 난수 시드를 고정한다(테스트 재현용).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// 시작 배너를 스크롤백에 깐다.
    pub fn show_banner(&mut self) {
        for line in welcome_lines() {
            self.push_line(line);
        }
    }

    /// 입력 리더와 공유할 게이트 핸들.
    pub fn gate(&self) -> InputGate {
        self.gate.clone()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn theme(&self) -> &'static Theme {
        self.theme
    }

    /// 입력 한 줄을 처리한다.
    /// 게이트는 원격 호출과 출력 애니메이션이 모두 끝날 때까지 잡혀 있다.
    pub async fn submit(&mut self, raw: &str) -> Submission {
        let Some(_busy) = self.gate.try_acquire() else {
            debug!("input refused while busy");
            return Submission::Busy;
        };

        let input = raw.trim();
        if input.is_empty() {
            return Submission::Ignored;
        }

        self.push_line(Line::user(format!("> {input}")));

        match parse_command(input) {
            Ok(Some(command)) => {
                debug!(?command, "dispatch");
                self.execute(command).await;
            }
            Ok(None) => {}
            Err(err) => {
                debug!(error = %err, "rejected input");
                self.type_lines(vec![Line::error(err.to_string())]).await;
            }
        }

        Submission::Completed
    }

    fn persist_favorites(&self) {
        // 쓰기 실패는 세션을 막지 않는다.
        if let Err(err) = self.store.save(self.favorites.as_set()) {
            warn!(error = %err, "failed to persist favorites");
        }
    }

    fn uptime_minutes(&self) -> i64 {
        (Local::now() - self.started_at).num_minutes()
    }
}

#[cfg(test)]
mod tests;
