//! 콘텐츠 API 응답 DTO. 모든 응답은 `{success, data, message}` 봉투를 쓴다.

use serde::Deserialize;

use crate::domain::volume::{Blessing, Volume, VolumeSummary};

#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 오류 응답은 본문이 비었거나 `data` 형태가 달라도 `message`만 읽는다.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BlessingDto {
    pub item: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VolumeDto {
    pub volume_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body_lines: Vec<String>,
    #[serde(default)]
    pub blessing_intro: Option<String>,
    #[serde(default)]
    pub blessings: Vec<BlessingDto>,
    #[serde(default)]
    pub dream: Option<String>,
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub favorite_count: Option<u64>,
    #[serde(default)]
    pub rating_count: Option<u64>,
    #[serde(default)]
    pub average_rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SummaryDto {
    pub volume_number: u32,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ExportDto {
    #[serde(default)]
    pub content: String,
}

impl From<BlessingDto> for Blessing {
    fn from(dto: BlessingDto) -> Self {
        Self {
            item: dto.item,
            description: dto.description,
        }
    }
}

impl From<VolumeDto> for Volume {
    fn from(dto: VolumeDto) -> Self {
        Self {
            volume_number: dto.volume_number,
            title: dto.title,
            body_lines: dto.body_lines,
            blessing_intro: dto.blessing_intro,
            blessings: dto.blessings.into_iter().map(Blessing::from).collect(),
            dream: dto.dream,
            edition: dto.edition,
            favorite_count: dto.favorite_count,
            rating_count: dto.rating_count,
            average_rating: dto.average_rating,
        }
    }
}

impl From<SummaryDto> for VolumeSummary {
    fn from(dto: SummaryDto) -> Self {
        Self {
            volume_number: dto.volume_number,
            title: dto.title,
        }
    }
}
