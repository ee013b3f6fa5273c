//! 타자기/스크램블 출력 애니메이션.
//!
//! 라인은 큐에 들어온 순서대로 한 줄씩만 드러난다.
//! 드러나는 동안 해당 라인만 `is_typing = true`다.

use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;
use tokio::time::sleep;

use super::TerminalSession;
use crate::domain::line::{Line, LineKind};

pub const DEFAULT_GLITCH_CHARS: &str = "█▓▒░^&*%$#@!+";
const SCRAMBLE_GLYPHS: &[char] = &[
    '!', '<', '>', '-', '_', '\\', '/', '[', ']', '{', '}', '—', '=', '+', '*', '^', '?', '#',
];
// 글자별 확정 프레임 범위
const SCRAMBLE_MAX_START: u32 = 20;
const SCRAMBLE_MAX_SPAN: u32 = 20;

/// 타자기 효과 파라미터.
#[derive(Debug, Clone, PartialEq)]
pub struct TypewriterSettings {
    pub base_delay: Duration,
    pub jitter: Duration,
    pub glitch_chance: f64,
    pub glitch_delay: Duration,
    pub glitch_chars: Vec<char>,
    pub scramble_frame: Duration,
    pub scramble_pause: Duration,
}

impl Default for TypewriterSettings {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(1),
            jitter: Duration::from_millis(15),
            glitch_chance: 0.1,
            glitch_delay: Duration::from_millis(1),
            glitch_chars: DEFAULT_GLITCH_CHARS.chars().collect(),
            scramble_frame: Duration::from_millis(16),
            scramble_pause: Duration::from_millis(150),
        }
    }
}

impl TypewriterSettings {
    /// 지연 없음, 글리치 없음.
    pub fn instant() -> Self {
        Self {
            base_delay: Duration::ZERO,
            jitter: Duration::ZERO,
            glitch_chance: 0.0,
            glitch_delay: Duration::ZERO,
            scramble_frame: Duration::ZERO,
            scramble_pause: Duration::ZERO,
            ..Self::default()
        }
    }

    fn char_delay(&self, rng: &mut StdRng) -> Duration {
        self.base_delay + self.jitter.mul_f64(rng.random::<f64>())
    }

    fn glitch_glyph(&self, ch: char, rng: &mut StdRng) -> Option<char> {
        if ch == ' ' || self.glitch_chars.is_empty() || self.glitch_chance <= 0.0 {
            return None;
        }
        if !rng.random_bool(self.glitch_chance.min(1.0)) {
            return None;
        }
        Some(self.glitch_chars[rng.random_range(0..self.glitch_chars.len())])
    }
}

impl TerminalSession {
    /// 완성 라인을 애니메이션 없이 추가한다.
    pub(super) fn push_line(&mut self, line: Line) {
        self.transcript.push(line);
        if let Some(line) = self.transcript.last() {
            self.screen.append(line, self.theme);
        }
    }

    pub(super) async fn type_lines(&mut self, lines: Vec<Line>) {
        for line in lines {
            self.type_line(line).await;
        }
    }

    async fn type_line(&mut self, line: Line) {
        let opened = self.transcript.begin_typing(line.kind);
        self.screen.append(opened, self.theme);

        let mut shown = String::with_capacity(line.text.len());
        for ch in line.text.chars() {
            if let Some(glyph) = self.typewriter.glitch_glyph(ch, &mut self.rng) {
                let mut frame = shown.clone();
                frame.push(glyph);
                self.show_frame(&frame);
                sleep(self.typewriter.glitch_delay).await;
            }

            shown.push(ch);
            self.show_frame(&shown);
            let delay = self.typewriter.char_delay(&mut self.rng);
            sleep(delay).await;
        }

        self.close_typing();
    }

    /// 목표 문자열이 무작위 기호에서 한 글자씩 확정되며 나타난다.
    pub(super) async fn scramble_line(&mut self, kind: LineKind, target: &str) {
        if target.is_empty() {
            self.push_line(Line::new(kind, ""));
            return;
        }

        let schedule: Vec<(char, u32, u32)> = target
            .chars()
            .map(|ch| {
                let start = self.rng.random_range(0..=SCRAMBLE_MAX_START);
                let end = start + self.rng.random_range(1..=SCRAMBLE_MAX_SPAN);
                (ch, start, end)
            })
            .collect();
        let last_frame = schedule.iter().map(|(_, _, end)| *end).max().unwrap_or(0);

        let opened = self.transcript.begin_typing(kind);
        self.screen.append(opened, self.theme);

        for frame in 0..=last_frame {
            let mut text = String::with_capacity(target.len());
            for (ch, start, end) in &schedule {
                if frame >= *end || *ch == ' ' {
                    text.push(*ch);
                } else if frame >= *start {
                    text.push(SCRAMBLE_GLYPHS[self.rng.random_range(0..SCRAMBLE_GLYPHS.len())]);
                }
            }
            self.show_frame(&text);
            sleep(self.typewriter.scramble_frame).await;
        }

        self.show_frame(target);
        self.close_typing();
    }

    fn show_frame(&mut self, text: &str) {
        if let Some(line) = self.transcript.set_typing_text(text) {
            self.screen.update(line, self.theme);
        }
    }

    fn close_typing(&mut self) {
        self.transcript.finish_typing();
        if let Some(line) = self.transcript.last() {
            self.screen.update(line, self.theme);
        }
    }
}
