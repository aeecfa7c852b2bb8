use std::path::Path;
use std::path::PathBuf;

use eyre::Result;
use eyre::WrapErr;
use rand::Rng;
use rand::distr::Alphanumeric;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::token::Token;

/// Why no usable token could be loaded. Every variant means "authorize again".
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no token file at {0}")]
    NotFound(PathBuf),
    #[error("failed to read token file: {0}")]
    Io(#[from] std::io::Error),
    #[error("token file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("token file has an empty access token")]
    Incomplete,
}

/// A single token persisted as JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Token, LoadError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        let token: Token = serde_json::from_slice(&bytes)?;
        if !token.is_complete() {
            return Err(LoadError::Incomplete);
        }
        debug!(path = %self.path.display(), "Loaded saved token");
        Ok(token)
    }

    /// Overwrites the file. Goes through a freshly created sibling temp file
    /// so a crash never leaves half a token behind. On unix the file is only
    /// readable by its owner.
    pub async fn save(&self, token: &Token) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }

        let tmp = self.temp_path();
        let contents = serde_json::to_string_pretty(token)?;
        if let Err(e) = write_new(&tmp, contents.as_bytes()).await {
            tokio::fs::remove_file(&tmp).await.ok();
            return Err(e).wrap_err_with(|| format!("Failed to write {}", tmp.display()));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            tokio::fs::remove_file(&tmp).await.ok();
            return Err(e).wrap_err_with(|| format!("Failed to replace {}", self.path.display()));
        }

        debug!(path = %self.path.display(), "Saved token");
        Ok(())
    }

    /// `<path>.<random>.tmp`, unpredictable so nobody can plant it first.
    fn temp_path(&self) -> PathBuf {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(format!(".{suffix}.tmp"));
        PathBuf::from(tmp)
    }
}

/// Create `path` exclusively, refusing existing files and symlinks.
async fn write_new(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}
