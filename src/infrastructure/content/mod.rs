//! 공개 콘텐츠 API(HTTP) 연동 구현.

mod dto;

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use self::dto::{BlessingDto, Envelope, ErrorBody, ExportDto, SummaryDto, VolumeDto};
use crate::application::ports::{ApiError, VolumeApi};
use crate::domain::volume::{Blessing, Volume, VolumeSummary};

pub struct HttpVolumeApi {
    client: Client,
    base_url: String,
}

impl HttpVolumeApi {
    /// `base_url`은 이미 정규화된 공개 API 루트(`.../api/public`)여야 한다.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("abelterm/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("content api: failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("Accept", "application/json")
    }

    /// 요청을 보내고 봉투의 `data`를 꺼낸다.
    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<Envelope<T>, ApiError> {
        let resp = req
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        debug!(%status, bytes = body.len(), "content api response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .unwrap_or_default()
                .message
                .filter(|m| !m.trim().is_empty());
            return Err(if status == StatusCode::NOT_FOUND {
                ApiError::NotFound { message }
            } else {
                ApiError::Status {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
        if envelope.success == Some(false) {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: envelope.message,
            });
        }
        Ok(envelope)
    }

    async fn fetch_data<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        self.fetch(req)
            .await?
            .data
            .ok_or_else(|| ApiError::Decode("missing data".to_string()))
    }

    async fn fetch_volume(&self, path: &str) -> Result<Volume, ApiError> {
        let dto: VolumeDto = self.fetch_data(self.request(Method::GET, path)).await?;
        Ok(dto.into())
    }

    async fn fetch_summaries(&self, req: RequestBuilder) -> Result<Vec<VolumeSummary>, ApiError> {
        let list: Vec<SummaryDto> = self.fetch_data(req).await?;
        Ok(list.into_iter().map(VolumeSummary::from).collect())
    }
}

#[async_trait]
impl VolumeApi for HttpVolumeApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn random_blessing(&self) -> Result<Blessing, ApiError> {
        let dto: BlessingDto = self.fetch_data(self.request(Method::GET, "/motd")).await?;
        Ok(dto.into())
    }

    async fn latest_volume(&self) -> Result<Volume, ApiError> {
        self.fetch_volume("/volumes/latest").await
    }

    async fn random_volume(&self) -> Result<Volume, ApiError> {
        self.fetch_volume("/volumes/random").await
    }

    async fn volume(&self, number: u32) -> Result<Volume, ApiError> {
        self.fetch_volume(&format!("/volumes/id/{number}")).await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<VolumeSummary>, ApiError> {
        let req = self
            .request(Method::GET, "/volumes/search")
            .query(&[("q", keyword)]);
        self.fetch_summaries(req).await
    }

    async fn catalogue(&self) -> Result<Vec<VolumeSummary>, ApiError> {
        self.fetch_summaries(self.request(Method::GET, "/volumes/catalogue"))
            .await
    }

    async fn rate(&self, number: u32, rating: u8) -> Result<String, ApiError> {
        let req = self
            .request(Method::POST, "/volumes/rate")
            .json(&json!({ "volumeNumber": number, "rating": rating }));
        let envelope: Envelope<serde_json::Value> = self.fetch(req).await?;
        Ok(envelope.message.unwrap_or_default())
    }

    async fn export(&self, start: u32, end: u32) -> Result<String, ApiError> {
        let req = self
            .request(Method::POST, "/volumes/export")
            .json(&json!({ "start": start, "end": end }));
        let dto: ExportDto = self.fetch_data(req).await?;
        Ok(dto.content)
    }
}
