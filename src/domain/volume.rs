//! 볼륨(greentext 연재물) 엔티티와 터미널 렌더링 규칙.

use crate::domain::line::{Line, LineKind};

pub const BRAND: &str = "The Abel Experience™";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blessing {
    pub item: String,
    pub description: String,
}

impl Blessing {
    /// `- item (description)` 형식.
    pub fn list_entry(&self) -> String {
        format!("- {} ({})", self.item, self.description)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Volume {
    pub volume_number: u32,
    pub title: String,
    pub body_lines: Vec<String>,
    pub blessing_intro: Option<String>,
    pub blessings: Vec<Blessing>,
    pub dream: Option<String>,
    pub edition: Option<String>,
    pub favorite_count: Option<u64>,
    pub rating_count: Option<u64>,
    pub average_rating: Option<f64>,
}

/// 카탈로그/검색 결과 한 건.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSummary {
    pub volume_number: u32,
    pub title: String,
}

impl VolumeSummary {
    pub fn list_entry(&self) -> String {
        format!("Volume {}: {}", self.volume_number, self.title)
    }
}

impl From<&Volume> for VolumeSummary {
    fn from(volume: &Volume) -> Self {
        Self {
            volume_number: volume.volume_number,
            title: volume.title.clone(),
        }
    }
}

/// `latest`/`random`/`view` 공용 렌더링.
/// 순서: 헤더 -> 본문 -> 축복 -> 꿈 -> 에디션. 순서를 바꾸지 않는다.
pub fn render_volume(volume: &Volume) -> Vec<Line> {
    let mut lines = Vec::with_capacity(volume.body_lines.len() + volume.blessings.len() + 4);
    lines.push(Line::system(format!(
        "--- Initializing {BRAND} Volume {}: {} ---",
        volume.volume_number, volume.title
    )));
    lines.extend(render_volume_body(volume));
    lines
}

/// 헤더를 제외한 볼륨 본문 라인.
pub fn render_volume_body(volume: &Volume) -> Vec<Line> {
    let mut lines = Vec::new();

    for body in &volume.body_lines {
        if body.trim().is_empty() {
            lines.push(Line::greentext(""));
        } else {
            lines.push(Line::greentext(format!("> {body}")));
        }
    }

    if !volume.blessings.is_empty() {
        if let Some(intro) = non_blank(volume.blessing_intro.as_deref()) {
            lines.push(Line::system(intro));
        }
        for blessing in &volume.blessings {
            lines.push(Line::new(LineKind::Info, blessing.list_entry()));
        }
    }

    if let Some(dream) = non_blank(volume.dream.as_deref()) {
        lines.push(Line::system(dream));
    }

    if let Some(edition) = non_blank(volume.edition.as_deref()) {
        lines.push(Line::system(format!("{BRAND}: {edition}")));
    }

    lines
}

/// 볼륨 통계 블록(`stats`).
pub fn render_volume_stats(volume: &Volume) -> Vec<Line> {
    let average = match volume.average_rating {
        Some(avg) if avg > 0.0 => format!("{avg:.1}"),
        _ => "N/A".to_string(),
    };

    vec![
        Line::system(format!(
            "--- STATISTICS FOR VOLUME {} ---",
            volume.volume_number
        )),
        Line::info(format!("Title: {}", volume.title)),
        Line::info(format!(
            "Times Favorited: {}",
            volume.favorite_count.unwrap_or(0)
        )),
        Line::info(format!(
            "Number of Ratings: {}",
            volume.rating_count.unwrap_or(0)
        )),
        Line::info(format!("Average Rating: {average} / 100")),
    ]
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
