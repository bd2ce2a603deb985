//! File-based artifact storage implementation

use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::{Error, Result};

/// URL path prefix under which stored artifacts are served
pub const PUBLIC_PREFIX: &str = "static/generated_files";

/// A stored document and the URL it can be fetched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileArtifact {
    pub relative_path: String,
    pub public_url: String,
}

/// Directory-backed artifact store
///
/// Files are written under exactly the caller's name. Concurrent writes to
/// the same name are not ordered: whichever finishes last is what later
/// reads observe.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the store, creating the artifact directory if needed.
    ///
    /// Safe to call when the directory already exists.
    pub async fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        debug!("Artifact directory ready: {:?}", root);
        Ok(Self { root })
    }

    /// Directory that holds the artifacts
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `bytes` under `filename`, replacing any previous file of that name.
    pub async fn save(&self, bytes: &[u8], filename: &str, host_url: &str) -> Result<FileArtifact> {
        validate_filename(filename)?;
        tokio::fs::write(self.root.join(filename), bytes).await?;

        Ok(FileArtifact {
            relative_path: filename.to_string(),
            public_url: self.resolve_url(filename, host_url),
        })
    }

    /// Public URL of an artifact: host, serving prefix, then the
    /// percent-encoded relative path.
    pub fn resolve_url(&self, relative_path: &str, host_url: &str) -> String {
        format!(
            "{}/{}/{}",
            host_url.trim_end_matches('/'),
            PUBLIC_PREFIX,
            urlencoding::encode(relative_path)
        )
    }

    /// Read an artifact back
    pub async fn fetch(&self, filename: &str) -> Result<Vec<u8>> {
        if validate_filename(filename).is_err() {
            return Err(Error::ArtifactNotFound(filename.to_string()));
        }

        match tokio::fs::read(self.root.join(filename)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::ArtifactNotFound(filename.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// A filename must name a single entry inside the artifact directory.
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty() {
        return Err(Error::Validation("Filename is required".into()));
    }
    if filename.contains(['/', '\\', '\0']) {
        return Err(Error::Validation(format!(
            "Filename must not contain path separators: {}",
            filename
        )));
    }

    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::Validation(format!("Invalid filename: {}", filename))),
    }
}
