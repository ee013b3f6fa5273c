//! 터미널 입력 처리기.
//! raw mode 한 줄 편집기와, 출력 중 키 입력을 버리는 키 리더 스레드.

use std::borrow::Cow;
use std::env;
use std::io::{self, IsTerminal, Write};
use std::thread;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, ClearType};
use crossterm::{execute, queue};
use tokio::sync::mpsc;
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::application::usecases::session::InputGate;
use crate::domain::theme::Theme;

const PROMPT: &str = "> ";

/// 색상/커서 제어가 가능한 출력인지 판단한다.
pub fn supports_styled_output() -> bool {
    if !io::stdout().is_terminal() {
        return false;
    }

    // dumb 터미널에서는 제어 시퀀스 기반 UI를 비활성화한다.
    if let Ok(term) = env::var("TERM")
        && term.eq_ignore_ascii_case("dumb")
    {
        return false;
    }

    true
}

/// raw mode 줄 편집기를 쓸 수 있는지 판단한다.
pub fn supports_interactive_input() -> bool {
    supports_styled_output() && io::stdin().is_terminal()
}

#[derive(Debug)]
pub enum InputEvent {
    Key(KeyEvent),
    Paste(String),
}

impl InputEvent {
    fn is_exit(&self) -> bool {
        match self {
            InputEvent::Key(key) => is_exit_key(key),
            InputEvent::Paste(_) => false,
        }
    }
}

/// 키 입력을 별도 스레드에서 읽어 채널로 넘긴다.
/// 게이트가 잡혀 있는 동안의 입력은 종료 키를 제외하고 버린다.
pub fn spawn_key_reader(gate: InputGate) -> mpsc::UnboundedReceiver<InputEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::spawn(move || {
        loop {
            let forwarded = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => InputEvent::Key(key),
                Ok(Event::Paste(text)) => InputEvent::Paste(text),
                Ok(_) => continue,
                Err(err) => {
                    debug!(error = %err, "key reader stopped");
                    break;
                }
            };

            if !should_forward(&gate, &forwarded) {
                continue;
            }
            if tx.send(forwarded).is_err() {
                break;
            }
        }
    });

    rx
}

/// 출력 중에는 종료 키만 통과시킨다.
fn should_forward(gate: &InputGate, event: &InputEvent) -> bool {
    !gate.is_busy() || event.is_exit()
}

fn is_exit_key(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
}

#[derive(Debug, PartialEq, Eq)]
pub enum EditorAction {
    Pending,
    Submit(String),
    Exit,
}

/// 프롬프트 한 줄 편집 상태. 커서는 문자(char) 단위 위치다.
#[derive(Debug, Default)]
pub struct LineEditor {
    input: String,
    cursor_chars: usize,
}

impl LineEditor {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        if is_exit_key(&key) {
            return EditorAction::Exit;
        }

        match key.code {
            KeyCode::Enter => {
                self.cursor_chars = 0;
                return EditorAction::Submit(std::mem::take(&mut self.input));
            }
            KeyCode::Backspace => {
                if self.cursor_chars > 0 {
                    remove_char_at(&mut self.input, self.cursor_chars - 1);
                    self.cursor_chars -= 1;
                }
            }
            KeyCode::Delete => {
                if self.cursor_chars < self.input.chars().count() {
                    remove_char_at(&mut self.input, self.cursor_chars);
                }
            }
            KeyCode::Left => {
                self.cursor_chars = self.cursor_chars.saturating_sub(1);
            }
            KeyCode::Right => {
                self.cursor_chars = (self.cursor_chars + 1).min(self.input.chars().count());
            }
            KeyCode::Home => {
                self.cursor_chars = 0;
            }
            KeyCode::End => {
                self.cursor_chars = self.input.chars().count();
            }
            KeyCode::Esc => {
                self.input.clear();
                self.cursor_chars = 0;
            }
            KeyCode::Char(ch) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    self.insert(ch);
                }
            }
            _ => {}
        }

        EditorAction::Pending
    }

    /// 붙여넣기는 첫 줄만 받는다.
    pub fn paste(&mut self, text: &str) {
        let first = text.lines().next().unwrap_or_default();
        for ch in first.chars().filter(|c| !c.is_control()) {
            self.insert(ch);
        }
    }

    fn insert(&mut self, ch: char) {
        insert_char_at(&mut self.input, self.cursor_chars, ch);
        self.cursor_chars += 1;
    }

    /// 현재 줄에 프롬프트를 다시 그린다.
    pub fn render(&self, out: &mut impl Write, theme: &Theme) -> Result<()> {
        let (w, _) = terminal::size().unwrap_or((80, 24));
        let width = usize::from(w).max(8);
        let available = width.saturating_sub(display_width(PROMPT) + 1);
        let shown = tail_with_ellipsis_display(&self.input, available);
        let col = prompt_cursor_col(&self.input, self.cursor_chars, width);
        let style = theme.user;

        queue!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Rgb {
                r: style.fg.0,
                g: style.fg.1,
                b: style.fg.2,
            }),
            Print(PROMPT),
            Print(shown),
            SetAttribute(Attribute::Reset),
            ResetColor,
            cursor::MoveToColumn(u16::try_from(col).unwrap_or(0)),
            cursor::Show
        )?;
        out.flush()?;
        Ok(())
    }
}

/// 제출 직후 프롬프트 줄을 비운다. 입력 echo는 세션이 스크롤백에 남긴다.
pub fn clear_prompt(out: &mut impl Write) -> Result<()> {
    queue!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine)
    )?;
    out.flush()?;
    Ok(())
}

/// raw mode 진입/복구 가드.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enter(stdout: &mut io::Stdout) -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout, cursor::Show)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, ResetColor);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

/// 로그 출력용 stderr. raw mode 중에는 줄바꿈을 `\r\n`으로 바꾼다.
#[derive(Debug)]
pub struct RawModeStderr(io::Stderr);

impl Default for RawModeStderr {
    fn default() -> Self {
        Self(io::stderr())
    }
}

impl Write for RawModeStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if terminal::is_raw_mode_enabled().unwrap_or(false) {
            self.0.write_all(&to_crlf(buf))?;
        } else {
            self.0.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

fn to_crlf(buf: &[u8]) -> Cow<'_, [u8]> {
    if !buf.contains(&b'\n') {
        return Cow::Borrowed(buf);
    }

    let mut out = Vec::with_capacity(buf.len() + 8);
    let mut prev = 0u8;
    for &byte in buf {
        if byte == b'\n' && prev != b'\r' {
            out.push(b'\r');
        }
        out.push(byte);
        prev = byte;
    }
    Cow::Owned(out)
}

fn prompt_cursor_col(input: &str, cursor_chars: usize, width: usize) -> usize {
    let prefix_width = display_width(PROMPT);
    let available = width.saturating_sub(prefix_width + 1);
    let before_cursor: String = input.chars().take(cursor_chars).collect();

    if display_width(input) <= available {
        return (prefix_width + display_width(&before_cursor)).min(width.saturating_sub(1));
    }

    // 넘친 입력은 꼬리만 보이므로 커서를 끝에 둔다.
    (prefix_width + display_width(&tail_with_ellipsis_display(input, available)))
        .min(width.saturating_sub(1))
}

fn tail_with_ellipsis_display(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if display_width(text) <= max_width {
        return text.to_string();
    }

    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let target = max_width - 3;
    let mut tail_rev = String::new();
    let mut used = 0usize;

    for ch in text.chars().rev() {
        let cw = char_display_width(ch);
        if used + cw > target {
            break;
        }
        tail_rev.push(ch);
        used += cw;
    }

    let tail: String = tail_rev.chars().rev().collect();
    format!("...{tail}")
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn char_display_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

fn insert_char_at(input: &mut String, char_idx: usize, ch: char) {
    let byte_idx = byte_index_at_char(input, char_idx);
    input.insert(byte_idx, ch);
}

fn remove_char_at(input: &mut String, char_idx: usize) {
    let start = byte_index_at_char(input, char_idx);
    let end = byte_index_at_char(input, char_idx + 1);
    if start < end && end <= input.len() {
        input.replace_range(start..end, "");
    }
}

fn byte_index_at_char(input: &str, char_idx: usize) -> usize {
    input
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}
