//! 터미널 색상 테마 프리셋.

use crate::domain::line::LineKind;

pub const DEFAULT_THEME: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// 라인 한 줄에 적용할 표시 스타일 토큰.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Option<Rgb>,
    pub bold: bool,
}

impl Style {
    const fn fg(color: Rgb) -> Self {
        Self {
            fg: color,
            bg: None,
            bold: false,
        }
    }

    const fn on(self, bg: Rgb) -> Self {
        Self {
            bg: Some(bg),
            ..self
        }
    }

    const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

/// 라인 종류 5개 + 커서에 대한 전체(total) 스타일 매핑.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub system: Style,
    pub info: Style,
    pub error: Style,
    pub greentext: Style,
    pub user: Style,
    pub cursor: Style,
}

impl Theme {
    pub fn style_for(&self, kind: LineKind) -> Style {
        match kind {
            LineKind::System => self.system,
            LineKind::Info => self.info,
            LineKind::Error => self.error,
            LineKind::Greentext => self.greentext,
            LineKind::User => self.user,
        }
    }
}

// Tailwind 팔레트에서 가져온 값.
mod palette {
    use super::Rgb;

    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const TEAL_300: Rgb = Rgb(94, 234, 212);
    pub const TEAL_400: Rgb = Rgb(45, 212, 191);
    pub const GRAY_200: Rgb = Rgb(229, 231, 235);
    pub const GRAY_300: Rgb = Rgb(209, 213, 219);
    pub const GRAY_400: Rgb = Rgb(156, 163, 175);
    pub const RED_200: Rgb = Rgb(254, 202, 202);
    pub const RED_300: Rgb = Rgb(252, 165, 165);
    pub const RED_400: Rgb = Rgb(248, 113, 113);
    pub const RED_500: Rgb = Rgb(239, 68, 68);
    pub const RED_800: Rgb = Rgb(153, 27, 27);
    pub const GREEN_200: Rgb = Rgb(187, 247, 208);
    pub const GREEN_300: Rgb = Rgb(134, 239, 172);
    pub const GREEN_400: Rgb = Rgb(74, 222, 128);
    pub const GREEN_500: Rgb = Rgb(34, 197, 94);
    pub const AMBER_100: Rgb = Rgb(254, 243, 199);
    pub const AMBER_200: Rgb = Rgb(253, 230, 138);
    pub const AMBER_300: Rgb = Rgb(252, 211, 77);
    pub const AMBER_400: Rgb = Rgb(251, 191, 36);
    pub const ROSE_200: Rgb = Rgb(254, 205, 211);
    pub const ROSE_400: Rgb = Rgb(251, 113, 133);
    pub const ROSE_500: Rgb = Rgb(244, 63, 94);
    pub const YELLOW_200: Rgb = Rgb(254, 240, 138);
    pub const YELLOW_300: Rgb = Rgb(253, 224, 71);
    pub const YELLOW_400: Rgb = Rgb(250, 204, 21);
    pub const SKY_100: Rgb = Rgb(224, 242, 254);
    pub const SKY_200: Rgb = Rgb(186, 230, 253);
    pub const SKY_300: Rgb = Rgb(125, 211, 252);
    pub const SKY_400: Rgb = Rgb(56, 189, 248);
    pub const INDIGO_400: Rgb = Rgb(129, 140, 248);
    pub const PURPLE_300: Rgb = Rgb(216, 180, 254);
    pub const VIOLET_300: Rgb = Rgb(196, 181, 253);
    pub const VIOLET_400: Rgb = Rgb(167, 139, 250);
    pub const FUCHSIA_300: Rgb = Rgb(240, 171, 252);
    pub const ORANGE_400: Rgb = Rgb(251, 146, 60);
    pub const SLATE_100: Rgb = Rgb(241, 245, 249);
    pub const SLATE_200: Rgb = Rgb(226, 232, 240);
    pub const EMERALD_300: Rgb = Rgb(110, 231, 183);
    pub const EMERALD_400: Rgb = Rgb(52, 211, 153);
    pub const CYAN_300: Rgb = Rgb(103, 232, 249);
    pub const CYAN_400: Rgb = Rgb(34, 211, 238);
    pub const PINK_400: Rgb = Rgb(244, 114, 182);
    pub const LIME_400: Rgb = Rgb(163, 230, 53);
    pub const LIME_500: Rgb = Rgb(132, 204, 22);
}

use palette::*;

const fn theme(
    name: &'static str,
    system: Style,
    info: Style,
    error: Style,
    greentext: Style,
    user: Style,
) -> Theme {
    // 커서는 항상 system 색을 따른다.
    Theme {
        name,
        system,
        info,
        error,
        greentext,
        user,
        cursor: Style::fg(system.fg),
    }
}

static PRESETS: [Theme; 15] = [
    theme(
        "default",
        Style::fg(TEAL_400),
        Style::fg(GRAY_300),
        Style::fg(RED_500),
        Style::fg(GREEN_500),
        Style::fg(WHITE),
    ),
    theme(
        "amber",
        Style::fg(AMBER_400),
        Style::fg(AMBER_200),
        Style::fg(RED_500),
        Style::fg(AMBER_300),
        Style::fg(AMBER_100),
    ),
    theme(
        "matrix",
        Style::fg(GREEN_400),
        Style::fg(GREEN_300),
        Style::fg(RED_500),
        Style::fg(GREEN_500),
        Style::fg(GREEN_200),
    ),
    theme(
        "rose",
        Style::fg(ROSE_400),
        Style::fg(ROSE_200),
        Style::fg(YELLOW_400),
        Style::fg(GREEN_400),
        Style::fg(WHITE),
    ),
    theme(
        "sky",
        Style::fg(SKY_400),
        Style::fg(SKY_200),
        Style::fg(RED_500),
        Style::fg(GREEN_400),
        Style::fg(WHITE),
    ),
    theme(
        "void",
        Style::fg(INDIGO_400),
        Style::fg(PURPLE_300),
        Style::fg(ROSE_500),
        Style::fg(GREEN_400),
        Style::fg(WHITE),
    ),
    theme(
        "noir",
        Style::fg(WHITE),
        Style::fg(GRAY_400),
        Style::fg(WHITE).on(RED_800),
        Style::fg(GRAY_200),
        Style::fg(WHITE).bold(),
    ),
    theme(
        "crimson",
        Style::fg(RED_500),
        Style::fg(RED_300),
        Style::fg(YELLOW_400),
        Style::fg(RED_400),
        Style::fg(RED_200),
    ),
    theme(
        "quantum",
        Style::fg(VIOLET_400),
        Style::fg(VIOLET_300),
        Style::fg(ROSE_500),
        Style::fg(INDIGO_400),
        Style::fg(FUCHSIA_300),
    ),
    theme(
        "sunset",
        Style::fg(ORANGE_400),
        Style::fg(AMBER_300),
        Style::fg(RED_500),
        Style::fg(AMBER_400),
        Style::fg(YELLOW_200),
    ),
    theme(
        "madrid",
        Style::fg(SLATE_200),
        Style::fg(SLATE_100),
        Style::fg(ROSE_500),
        Style::fg(INDIGO_400),
        Style::fg(YELLOW_300),
    ),
    theme(
        "polar",
        Style::fg(SKY_300),
        Style::fg(SKY_200),
        Style::fg(ROSE_400),
        Style::fg(TEAL_300),
        Style::fg(SKY_100),
    ),
    theme(
        "solar",
        Style::fg(EMERALD_300),
        Style::fg(CYAN_300),
        Style::fg(ROSE_500),
        Style::fg(EMERALD_400),
        Style::fg(AMBER_300),
    ),
    theme(
        "city",
        Style::fg(CYAN_400),
        Style::fg(PINK_400),
        Style::fg(ROSE_500),
        Style::fg(LIME_400),
        Style::fg(FUCHSIA_300),
    ),
    theme(
        "monokai",
        Style::fg(LIME_400),
        Style::fg(CYAN_300),
        Style::fg(ROSE_500),
        Style::fg(LIME_500),
        Style::fg(YELLOW_300),
    ),
];

/// 고정 프리셋 레지스트리.
pub struct ThemeRegistry;

impl ThemeRegistry {
    pub fn names() -> Vec<&'static str> {
        PRESETS.iter().map(|t| t.name).collect()
    }

    /// 대소문자를 무시하고 프리셋을 찾는다.
    pub fn find(name: &str) -> Option<&'static Theme> {
        let name = name.trim();
        PRESETS.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn default_theme() -> &'static Theme {
        &PRESETS[0]
    }
}
