//! 정적 출력 문구(배너/도움말/about/고양이/voidz).

use crate::domain::line::Line;
use crate::domain::volume::BRAND;

/// 세션 시작 시 스크롤백에 깔리는 배너.
pub fn welcome_lines() -> Vec<Line> {
    vec![
        Line::system(format!(
            "{BRAND} Cognitive Framework v3.0 — Distributed Terminal Interface | Encrypted | Monitored"
        )),
        Line::system(
            "Session initialized: Core modules linked | Memory sectors mapped | Operator input unlocked",
        ),
        Line::info("Type \"help\" to display available commands."),
    ]
}

const HELP_ENTRIES: [(&str, &str); 21] = [
    ("about", "Display information about this project."),
    ("help", "Shows this list of commands."),
    ("motd", "Displays the Message of the Day."),
    ("date", "Displays the current system date and time."),
    ("catalogue", "View all published volumes."),
    ("latest", "View the most recent volume."),
    ("random", "View a random volume."),
    ("search [keyword]", "Search for volumes by keyword."),
    ("view [number]", "View a specific volume by number."),
    ("stats [number]", "Show engagement statistics for a volume."),
    ("voidz [number]", "Enter the VOIDZ."),
    ("favorite [num]", "Add a volume to your local favorites."),
    ("favorites", "View your list of favorited volumes."),
    ("rate [num] [1-100]", "Rate a specific volume."),
    ("export [from] [to]", "Save a range of volumes to a text file."),
    ("theme [name]", "Change terminal color theme."),
    ("themes", "List all available themes."),
    ("api", "Show the content API in use."),
    ("clear", "Clear the terminal screen."),
    ("cat", "Displays a cat."),
    ("exit", "Leave the terminal."),
];

pub fn help_lines() -> Vec<Line> {
    let mut lines = vec![Line::system(format!("--- {BRAND} CFW Help ---"))];
    lines.extend(
        HELP_ENTRIES
            .iter()
            .map(|(usage, description)| Line::info(format!("> {usage:<20} - {description}"))),
    );
    lines
}

/// `about` 블록. 가동 시간은 세션 시작 이후 경과 분으로 추정한다.
pub fn about_text(version: &str, theme: &str, uptime_minutes: i64, favorites: usize) -> String {
    format!(
        "{BRAND} Cognitive Framework
------------------------------------------
OS:        CFW v3.0 (abelterm {version})
Shell:     cfw-sh
Theme:     {theme}
Uptime:    {uptime}
Favorites: {favorites} volume(s) pinned
Memory:    greentext sectors mapped
------------------------------------------
A terminal for reading The Abel Experience™ volumes.
Every line is typed live. Some of them glitch.",
        uptime = format_uptime(uptime_minutes),
    )
}

fn format_uptime(minutes: i64) -> String {
    let minutes = minutes.max(0);
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, m) => format!("{h} h {m} min"),
    }
}

pub const CAT: &str = r#"
      /\_/\
     ( o.o )
      > ^ <
     /     \
    (|     |)
     \_____/
  meow. the cat has seen every volume."#;

pub const VOIDZ_PHRASES: [&str; 5] = [
    "INITIATING COGNITIVE SYNC...",
    "ACCESSING THE VOIDZ...",
    "REALITY MATRIX COMPROMISED.",
    "ERROR: UNSTABLE PARADIGM.",
    "RESTORING... OK.",
];
