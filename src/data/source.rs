//! Where the raw blueprint documents come from.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::LoadError;

pub const DEFAULT_DATA_URL: &str = "https://raw.githubusercontent.com/cohstats/coh3-data/master/data";

/// One exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Sbps,
    Ebps,
    Weapon,
    Upgrade,
    Locstring,
}

impl Dataset {
    pub const ALL: [Dataset; 5] = [
        Dataset::Locstring,
        Dataset::Sbps,
        Dataset::Ebps,
        Dataset::Weapon,
        Dataset::Upgrade,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Sbps => "sbps",
            Dataset::Ebps => "ebps",
            Dataset::Weapon => "weapon",
            Dataset::Upgrade => "upgrade",
            Dataset::Locstring => "locstring",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot source: the published data repository over HTTPS, a local
/// checkout of it, or documents held in memory.
#[derive(Debug, Clone)]
pub enum SnapshotSource {
    Http {
        base_url: String,
        client: reqwest::Client,
    },
    Directory(PathBuf),
    Memory(HashMap<Dataset, Value>),
}

impl SnapshotSource {
    pub fn http(base_url: impl Into<String>) -> Self {
        SnapshotSource::Http {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        SnapshotSource::Directory(path.into())
    }

    pub fn memory(documents: impl IntoIterator<Item = (Dataset, Value)>) -> Self {
        SnapshotSource::Memory(documents.into_iter().collect())
    }

    /// Human-readable location of `dataset`, used for provenance.
    pub fn location(&self, dataset: Dataset) -> String {
        match self {
            SnapshotSource::Http { base_url, .. } => format!("{base_url}/{}", dataset.file_name()),
            SnapshotSource::Directory(dir) => dir.join(dataset.file_name()).display().to_string(),
            SnapshotSource::Memory(_) => format!("memory:{dataset}"),
        }
    }

    /// Fetch and decode one document. The top level must be a JSON object.
    pub async fn fetch(&self, dataset: Dataset) -> Result<Value, LoadError> {
        let document = match self {
            SnapshotSource::Http { client, .. } => {
                let url = self.location(dataset);
                tracing::info!(%url, "fetching dataset");
                let response = client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|source| LoadError::Http {
                        url: url.clone(),
                        source,
                    })?;
                if !response.status().is_success() {
                    return Err(LoadError::Status {
                        url,
                        status: response.status().as_u16(),
                    });
                }
                let bytes = response.bytes().await.map_err(|source| LoadError::Http {
                    url: url.clone(),
                    source,
                })?;
                decode(dataset, &bytes)?
            }
            SnapshotSource::Directory(dir) => {
                let path = dir.join(dataset.file_name());
                tracing::info!(path = %path.display(), "reading dataset");
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|source| LoadError::Io { path, source })?;
                decode(dataset, &bytes)?
            }
            SnapshotSource::Memory(documents) => documents
                .get(&dataset)
                .cloned()
                .ok_or(LoadError::Missing {
                    dataset: dataset.as_str(),
                })?,
        };

        if !document.is_object() {
            return Err(LoadError::NotAnObject {
                dataset: dataset.as_str(),
            });
        }
        Ok(document)
    }
}

fn decode(dataset: Dataset, bytes: &[u8]) -> Result<Value, LoadError> {
    serde_json::from_slice(bytes).map_err(|source| LoadError::Decode {
        dataset: dataset.as_str(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn http_location_joins_file_name() {
        let source = SnapshotSource::http("https://example.org/data/");
        assert_eq!(
            source.location(Dataset::Sbps),
            "https://example.org/data/sbps.json"
        );
    }

    #[tokio::test]
    async fn memory_source_rejects_missing_and_non_object_documents() {
        let source = SnapshotSource::memory([(Dataset::Weapon, json!([1, 2]))]);
        assert!(matches!(
            source.fetch(Dataset::Sbps).await,
            Err(LoadError::Missing { dataset: "sbps" })
        ));
        assert!(matches!(
            source.fetch(Dataset::Weapon).await,
            Err(LoadError::NotAnObject { dataset: "weapon" })
        ));
    }

    #[tokio::test]
    async fn directory_source_reports_decode_errors() {
        let dir = std::env::temp_dir().join(format!("coh3-explorer-source-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("ebps.json"), b"{not json").await.unwrap();

        let source = SnapshotSource::directory(&dir);
        assert!(matches!(
            source.fetch(Dataset::Ebps).await,
            Err(LoadError::Decode { dataset: "ebps", .. })
        ));
        assert!(matches!(
            source.fetch(Dataset::Upgrade).await,
            Err(LoadError::Io { .. })
        ));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
