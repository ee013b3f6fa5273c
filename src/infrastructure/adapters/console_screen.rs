//! 스크롤백 출력 포트 구현 어댑터(crossterm).

use std::io::{self, Write};

use crossterm::cursor;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, ClearType};
use unicode_width::UnicodeWidthStr;

use crate::application::ports::Screen;
use crate::domain::line::Line;
use crate::domain::theme::{Rgb, Style, Theme};

const CURSOR_GLYPH: &str = "▋";
const FALLBACK_COLUMNS: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    /// 색상 + 타이핑 프레임 재그리기. raw mode에서도 안전한 `\r\n` 개행.
    Styled,
    /// 파이프/덤 터미널: 완성된 라인만 평문으로 쓴다.
    Plain,
}

pub struct ConsoleScreen<W: Write + Send = io::Stdout> {
    out: W,
    mode: ScreenMode,
    // 열린 타이핑 라인이 차지한 행 수
    open_rows: Option<usize>,
}

impl ConsoleScreen {
    pub fn stdout(mode: ScreenMode) -> Self {
        Self::with_writer(io::stdout(), mode)
    }
}

impl<W: Write + Send> ConsoleScreen<W> {
    pub fn with_writer(out: W, mode: ScreenMode) -> Self {
        Self {
            out,
            mode,
            open_rows: None,
        }
    }

    fn columns(&self) -> usize {
        terminal::size()
            .map(|(w, _)| usize::from(w))
            .ok()
            .filter(|w| *w > 0)
            .unwrap_or(FALLBACK_COLUMNS)
    }

    fn draw(&mut self, line: &Line, theme: &Theme) -> usize {
        let style = theme.style_for(line.kind);
        let _ = write_styled(&mut self.out, &line.text, style);

        let mut width = UnicodeWidthStr::width(line.text.as_str());
        if line.is_typing {
            let _ = write_styled(&mut self.out, CURSOR_GLYPH, theme.cursor);
            width += UnicodeWidthStr::width(CURSOR_GLYPH);
        }

        let columns = self.columns();
        width.div_ceil(columns).max(1)
    }

    fn rewind_open_line(&mut self) {
        if let Some(rows) = self.open_rows.take() {
            if rows > 1 {
                let up = u16::try_from(rows - 1).unwrap_or(u16::MAX);
                let _ = queue!(self.out, cursor::MoveUp(up));
            }
            let _ = queue!(
                self.out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::FromCursorDown)
            );
        }
    }

    fn finish(&mut self, line: &Line, rows: usize) {
        if line.is_typing {
            self.open_rows = Some(rows);
        } else {
            let _ = queue!(self.out, Print("\r\n"));
        }
        let _ = self.out.flush();
    }

    fn write_plain(&mut self, line: &Line) {
        if line.is_typing {
            return;
        }
        let _ = writeln!(self.out, "{}", line.text);
        let _ = self.out.flush();
    }
}

impl<W: Write + Send> Screen for ConsoleScreen<W> {
    fn append(&mut self, line: &Line, theme: &Theme) {
        if self.mode == ScreenMode::Plain {
            self.write_plain(line);
            return;
        }

        if self.open_rows.take().is_some() {
            let _ = queue!(self.out, Print("\r\n"));
        }
        let rows = self.draw(line, theme);
        self.finish(line, rows);
    }

    fn update(&mut self, line: &Line, theme: &Theme) {
        if self.mode == ScreenMode::Plain {
            self.write_plain(line);
            return;
        }

        self.rewind_open_line();
        let rows = self.draw(line, theme);
        self.finish(line, rows);
    }

    fn clear(&mut self) {
        self.open_rows = None;
        if self.mode == ScreenMode::Styled {
            let _ = queue!(
                self.out,
                terminal::Clear(ClearType::All),
                terminal::Clear(ClearType::Purge),
                cursor::MoveTo(0, 0)
            );
            let _ = self.out.flush();
        }
    }
}

fn write_styled(out: &mut impl Write, text: &str, style: Style) -> io::Result<()> {
    queue!(out, SetForegroundColor(color(style.fg)))?;
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(color(bg)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::domain::line::{LineKind, Transcript};
    use crate::domain::theme::ThemeRegistry;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn typed(screen: &mut impl Screen, text: &str, theme: &Theme) {
        let mut transcript = Transcript::new();
        let opened = transcript.begin_typing(LineKind::Info);
        screen.append(opened, theme);
        let mut shown = String::new();
        for ch in text.chars() {
            shown.push(ch);
            if let Some(line) = transcript.set_typing_text(&shown) {
                screen.update(line, theme);
            }
        }
        transcript.finish_typing();
        if let Some(line) = transcript.last() {
            screen.update(line, theme);
        }
    }

    #[test]
    fn plain_mode_writes_only_finished_lines() {
        let buf = SharedBuf::default();
        let mut screen = ConsoleScreen::with_writer(buf.clone(), ScreenMode::Plain);
        let theme = ThemeRegistry::default_theme();

        screen.append(&Line::user("> help"), theme);
        typed(&mut screen, "abc", theme);
        screen.clear();

        assert_eq!(buf.text(), "> help\nabc\n");
    }

    #[test]
    fn styled_mode_colors_and_redraws_typing_line() {
        let buf = SharedBuf::default();
        let mut screen = ConsoleScreen::with_writer(buf.clone(), ScreenMode::Styled);
        let theme = ThemeRegistry::find("matrix").unwrap();

        typed(&mut screen, "hi", theme);

        let out = buf.text();
        assert!(out.contains("\x1b[38;2;"));
        assert!(out.contains(CURSOR_GLYPH));
        assert!(out.contains('\r'));
        assert!(out.ends_with("\r\n"));
        assert!(screen.open_rows.is_none());
    }
}
