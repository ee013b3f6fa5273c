//! 입력 한 줄을 터미널 명령으로 해석하는 모듈.

use thiserror::Error;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    About,
    Date,
    Blessing,
    Latest,
    Random,
    Search { keyword: String },
    Catalogue,
    View { volume: u32 },
    Favorite { volume: u32 },
    Favorites,
    Rate { volume: u32, rating: u8 },
    Theme { name: String },
    Themes,
    Clear,
    Api,
    Cat,
    Stats { volume: u32 },
    Export { start: u32, end: u32 },
    /// 번호가 없으면 스크램블 문구만 출력한다.
    Voidz { volume: Option<u32> },
}

/// 원격 호출 전에 걸러지는 입력 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Command not found: {input}. Type 'help' for a list of commands.")]
    Unknown { input: String },
    #[error("{0}")]
    Usage(&'static str),
}

const USAGE_SEARCH: &str = "Usage: search [keyword]";
const USAGE_VIEW: &str = "Error: Please provide a valid volume number. Usage: view [number]";
const USAGE_FAVORITE: &str = "Usage: favorite [volume number]";
const USAGE_RATE: &str = "Usage: rate [volume number] [rating 1-100]";
const USAGE_THEME: &str = "Usage: theme [name]. Type \"themes\" to see available options.";
const USAGE_STATS: &str = "Usage: stats [volume number]";
const USAGE_EXPORT: &str = "Usage: export [start_number] [end_number]";

/// 입력을 명령으로 변환한다.
/// - 앞뒤 공백 제거 후 단일 공백으로 토큰화한다.
/// - 명령 이름만 소문자로 비교하고 인자는 원문을 유지한다.
/// - 빈 입력은 `Ok(None)`.
pub fn parse_command(input: &str) -> Result<Option<Command>, CommandError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut tokens = trimmed.split(' ');
    let name = tokens.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = tokens.collect();
    let arg = |idx: usize| args.get(idx).copied().unwrap_or("");

    let command = match name.as_str() {
        "help" => Command::Help,
        "about" => Command::About,
        "date" => Command::Date,
        "motd" | "blessing" => Command::Blessing,
        "latest" => Command::Latest,
        "random" => Command::Random,
        "catalogue" => Command::Catalogue,
        "favorites" => Command::Favorites,
        "themes" => Command::Themes,
        "clear" => Command::Clear,
        "api" => Command::Api,
        "cat" => Command::Cat,
        "search" => {
            let keyword = args.join(" ").trim().to_string();
            if keyword.is_empty() {
                return Err(CommandError::Usage(USAGE_SEARCH));
            }
            Command::Search { keyword }
        }
        "view" => Command::View {
            volume: parse_volume_number(arg(0)).ok_or(CommandError::Usage(USAGE_VIEW))?,
        },
        "favorite" => Command::Favorite {
            volume: parse_volume_number(arg(0)).ok_or(CommandError::Usage(USAGE_FAVORITE))?,
        },
        "stats" => Command::Stats {
            volume: parse_volume_number(arg(0)).ok_or(CommandError::Usage(USAGE_STATS))?,
        },
        "rate" => {
            let volume = parse_volume_number(arg(0)).ok_or(CommandError::Usage(USAGE_RATE))?;
            let rating = parse_rating(arg(1)).ok_or(CommandError::Usage(USAGE_RATE))?;
            Command::Rate { volume, rating }
        }
        "theme" => {
            let name = arg(0);
            if name.is_empty() {
                return Err(CommandError::Usage(USAGE_THEME));
            }
            Command::Theme {
                name: name.to_string(),
            }
        }
        "export" => {
            let start = parse_volume_number(arg(0));
            let end = parse_volume_number(arg(1));
            match (start, end) {
                (Some(start), Some(end)) if start <= end => Command::Export { start, end },
                _ => return Err(CommandError::Usage(USAGE_EXPORT)),
            }
        }
        "voidz" => Command::Voidz {
            volume: parse_volume_number(arg(0)),
        },
        _ => {
            return Err(CommandError::Unknown {
                input: trimmed.to_string(),
            });
        }
    };

    Ok(Some(command))
}

/// 볼륨 번호는 1 이상의 정수만 허용한다.
pub fn parse_volume_number(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// 평점은 1~100 정수.
pub fn parse_rating(raw: &str) -> Option<u8> {
    let value = raw.trim().parse::<u32>().ok()?;
    if (u32::from(MIN_RATING)..=u32::from(MAX_RATING)).contains(&value) {
        u8::try_from(value).ok()
    } else {
        None
    }
}
