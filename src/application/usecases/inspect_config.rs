//! `abelterm config`: 병합된 설정과 탐색 경로를 보여주는 유스케이스.

use anyhow::{Context, Result};

use crate::application::ports::ConfigRepository;

pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl InspectConfigUseCase<'_> {
    /// 진단 JSON 문자열을 만든다.
    pub fn execute(&self) -> Result<String> {
        self.config_repo
            .inspect_pretty_json()
            .context("failed to inspect configuration")
    }
}
