//! 활동지 저장 서비스 - 업무 능력 계층
//!
//! 활동지 한 장을 TOML 파일로 쓰는 능력만 가진다.

use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{AppResult, FileError};
use crate::models::Worksheet;

/// 같은 이름이 있을 때 붙여 볼 번호의 최댓값
const MAX_NAME_ATTEMPTS: u32 = 100;

/// 활동지 저장 서비스
///
/// 기존 파일은 덮어쓰지 않는다. 이름이 겹치면 `_1`, `_2` ... 를 붙인다.
pub struct WorksheetWriter {
    output_dir: PathBuf,
}

impl WorksheetWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 활동지 저장
    ///
    /// # 반환
    /// 저장한 파일 경로
    pub async fn write(&self, worksheet: &Worksheet) -> AppResult<PathBuf> {
        let body = toml::to_string_pretty(worksheet).map_err(FileError::from)?;

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| FileError::WriteFailed {
                path: self.output_dir.display().to_string(),
                source,
            })?;

        let (path, mut file) = self.create_unique(worksheet).await?;
        debug!("활동지 저장: {} ({} bytes)", path.display(), body.len());

        let written = async {
            file.write_all(body.as_bytes()).await?;
            file.flush().await
        }
        .await;
        written.map_err(|source| FileError::WriteFailed {
            path: path.display().to_string(),
            source,
        })?;

        info!("💾 활동지 저장 완료: {}", path.display());
        Ok(path)
    }

    /// 아직 없는 이름으로 새 파일을 만든다
    async fn create_unique(&self, worksheet: &Worksheet) -> AppResult<(PathBuf, fs::File)> {
        let mut attempt = 0;
        loop {
            let name = match attempt {
                0 => worksheet.file_name(),
                n => worksheet.numbered_file_name(n),
            };
            let path = self.output_dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < MAX_NAME_ATTEMPTS => {
                    debug!("이미 있는 파일, 다음 이름 시도: {}", path.display());
                    attempt += 1;
                }
                Err(source) => {
                    return Err(FileError::WriteFailed {
                        path: path.display().to_string(),
                        source,
                    }
                    .into())
                }
            }
        }
    }
}
