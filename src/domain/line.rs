//! 터미널 출력 라인과 스크롤백(transcript) 모델.

/// 라인 종류. 테마는 이 값을 기준으로 스타일을 고른다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    System,
    Info,
    Error,
    Greentext,
    User,
}

impl LineKind {
    #[cfg(test)]
    pub const ALL: [LineKind; 5] = [
        LineKind::System,
        LineKind::Info,
        LineKind::Error,
        LineKind::Greentext,
        LineKind::User,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub kind: LineKind,
    pub is_typing: bool,
}

impl Line {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            is_typing: false,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(LineKind::System, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(LineKind::Info, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(LineKind::Error, text)
    }

    pub fn greentext(text: impl Into<String>) -> Self {
        Self::new(LineKind::Greentext, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(LineKind::User, text)
    }
}

/// 세션 동안 append-only로 유지되는 스크롤백.
/// - 제자리 수정은 마지막 타이핑 중 라인에만 허용된다.
/// - `is_typing`인 라인은 항상 최대 1개다.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    lines: Vec<Line>,
    typing: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last(&self) -> Option<&Line> {
        self.lines.last()
    }

    /// 완성된 라인을 즉시 추가한다.
    pub fn push(&mut self, line: Line) {
        self.finish_typing();
        self.lines.push(Line {
            is_typing: false,
            ..line
        });
    }

    /// 빈 텍스트의 타이핑 라인을 연다. 이전 타이핑 라인은 먼저 닫는다.
    pub fn begin_typing(&mut self, kind: LineKind) -> &Line {
        self.finish_typing();
        self.lines.push(Line {
            text: String::new(),
            kind,
            is_typing: true,
        });
        self.typing = true;
        &self.lines[self.lines.len() - 1]
    }

    /// 타이핑 중인 라인의 텍스트를 교체한다. 타이핑 라인이 없으면 `None`.
    pub fn set_typing_text(&mut self, text: &str) -> Option<&Line> {
        if !self.typing {
            return None;
        }
        let line = self.lines.last_mut()?;
        line.text.clear();
        line.text.push_str(text);
        Some(&*line)
    }

    pub fn finish_typing(&mut self) {
        if !self.typing {
            return;
        }
        if let Some(line) = self.lines.last_mut() {
            line.is_typing = false;
        }
        self.typing = false;
    }

    pub fn typing_line(&self) -> Option<&Line> {
        if self.typing { self.lines.last() } else { None }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.typing = false;
    }
}
