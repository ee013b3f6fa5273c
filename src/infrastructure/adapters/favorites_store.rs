//! 즐겨찾기 저장 포트 구현 어댑터.
//!
//! 저장 파일은 문자열 키 -> JSON 값의 단순 key/value 문서이며,
//! 즐겨찾기는 `terminalFavorites` 키 아래 숫자 배열로 둔다. 다른 키는 보존한다.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::application::ports::FavoritesStore;

pub const FAVORITES_KEY: &str = "terminalFavorites";

pub struct JsonFavoritesStore {
    path: PathBuf,
}

impl JsonFavoritesStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_document(&self) -> Result<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read storage at {}", self.path.display()))?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse storage JSON in {}", self.path.display()))
    }
}

impl FavoritesStore for JsonFavoritesStore {
    fn load(&self) -> Result<BTreeSet<u32>> {
        let document = self.read_document()?;
        let Some(value) = document.get(FAVORITES_KEY) else {
            return Ok(BTreeSet::new());
        };

        let entries = value
            .as_array()
            .with_context(|| format!("`{FAVORITES_KEY}` is not an array"))?;
        // 양의 정수가 아닌 항목은 버린다.
        let favorites = entries
            .iter()
            .filter_map(Value::as_u64)
            .filter_map(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .collect();
        Ok(favorites)
    }

    fn save(&self, favorites: &BTreeSet<u32>) -> Result<()> {
        // 읽을 수 없는 문서는 덮어쓰지 않는다.
        let mut document = self.read_document()?;
        document.insert(
            FAVORITES_KEY.to_string(),
            Value::from(favorites.iter().copied().collect::<Vec<u32>>()),
        );

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }

        let rendered = serde_json::to_string_pretty(&document)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, format!("{rendered}\n"))
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        debug!(path = %self.path.display(), count = favorites.len(), "favorites saved");
        Ok(())
    }
}
