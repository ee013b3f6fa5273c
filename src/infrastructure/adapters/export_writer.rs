//! 내보내기 파일 기록 어댑터.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::application::ports::ExportWriter;

/// 지정 디렉터리 아래에 내보내기 파일을 만든다.
pub struct DirectoryExportWriter {
    dir: PathBuf,
}

impl DirectoryExportWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl ExportWriter for DirectoryExportWriter {
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        // 파일 이름에 경로 구분자가 섞이면 디렉터리 밖으로 나갈 수 있다.
        if Path::new(file_name).file_name() != Some(file_name.as_ref()) {
            bail!("invalid export file name: {file_name}");
        }

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create directory {}", self.dir.display()))?;
        let path = self.dir.join(file_name);
        fs::write(&path, content)
            .with_context(|| format!("failed to write export at {}", path.display()))?;
        Ok(path)
    }
}
