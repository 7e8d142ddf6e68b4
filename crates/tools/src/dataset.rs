use std::fmt;
use std::path::PathBuf;

use formats::{TerritoryDatasetError, territory_set_from_bytes};
use territory::{Completion, TerritorySet, TerritoryStore};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Where the territory dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Http(String),
}

impl DatasetSource {
    pub fn parse(source: &str) -> Self {
        let s = source.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            DatasetSource::Http(s.to_string())
        } else {
            DatasetSource::File(PathBuf::from(s))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::File(path) => write!(f, "{}", path.display()),
            DatasetSource::Http(url) => f.write_str(url),
        }
    }
}

#[derive(Debug)]
pub enum DatasetLoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Http {
        url: String,
        source: reqwest::Error,
    },
    Status {
        url: String,
        status: u16,
    },
    Parse(TerritoryDatasetError),
}

impl fmt::Display for DatasetLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetLoadError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            DatasetLoadError::Http { url, source } => write!(f, "GET {url} failed: {source}"),
            DatasetLoadError::Status { url, status } => {
                write!(f, "GET {url} returned HTTP {status}")
            }
            DatasetLoadError::Parse(e) => write!(f, "territory dataset error: {e}"),
        }
    }
}

impl std::error::Error for DatasetLoadError {}

pub async fn fetch_territories(
    client: &reqwest::Client,
    source: &DatasetSource,
) -> Result<TerritorySet, DatasetLoadError> {
    let bytes = match source {
        DatasetSource::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| DatasetLoadError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        DatasetSource::Http(url) => {
            let http_err = |source| DatasetLoadError::Http {
                url: url.clone(),
                source,
            };
            let resp = client.get(url).send().await.map_err(http_err)?;
            if !resp.status().is_success() {
                return Err(DatasetLoadError::Status {
                    url: url.clone(),
                    status: resp.status().as_u16(),
                });
            }
            resp.bytes().await.map_err(http_err)?.to_vec()
        }
    };
    territory_set_from_bytes(&bytes).map_err(DatasetLoadError::Parse)
}

/// Start the store's one dataset load on the tokio runtime.
///
/// The task holds only the load ticket, so dropping the store while the fetch
/// is in flight makes the completion a no-op. Returns `None` when the store
/// has already started (or finished) its load.
pub fn spawn_load(
    store: &TerritoryStore,
    client: reqwest::Client,
    source: DatasetSource,
) -> Option<JoinHandle<Completion>> {
    let Some(ticket) = store.begin_load() else {
        debug!(%source, "territory dataset already requested");
        return None;
    };
    info!(%source, "loading territory dataset");

    Some(tokio::spawn(async move {
        let result = fetch_territories(&client, &source).await;
        match &result {
            Ok(set) => info!(
                %source,
                territories = set.len(),
                skipped = set.skipped_features(),
                hash = set.content_hash().unwrap_or("-"),
                "territory dataset ready"
            ),
            Err(e) => warn!(%source, error = %e, "territory dataset unavailable"),
        }
        let completion = ticket.complete(result);
        if completion == Completion::Discarded {
            debug!(%source, "territory store dropped before load finished");
        }
        completion
    }))
}

#[cfg(test)]
mod tests {
    use super::{DatasetLoadError, DatasetSource, fetch_territories, spawn_load};
    use std::path::PathBuf;
    use territory::{Completion, DatasetStatus, TerritoryStore};

    fn fixture() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../formats/assets/territories.geojson")
    }

    #[test]
    fn parses_sources() {
        assert_eq!(
            DatasetSource::parse("https://example.test/c.geojson"),
            DatasetSource::Http("https://example.test/c.geojson".to_string())
        );
        assert_eq!(
            DatasetSource::parse(" data/c.geojson "),
            DatasetSource::File(PathBuf::from("data/c.geojson"))
        );
        assert_eq!(DatasetSource::parse("http://x").to_string(), "http://x");
    }

    #[tokio::test]
    async fn fetches_local_fixture() {
        let client = reqwest::Client::new();
        let set = fetch_territories(&client, &DatasetSource::File(fixture()))
            .await
            .expect("load fixture");
        assert_eq!(set.len(), 4);
        assert!(set.content_hash().is_some());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let client = reqwest::Client::new();
        let source = DatasetSource::File(PathBuf::from("/nonexistent/territories.geojson"));
        let err = fetch_territories(&client, &source).await.unwrap_err();
        assert!(matches!(err, DatasetLoadError::Io { .. }));
    }

    #[tokio::test]
    async fn spawned_load_makes_store_ready_once() {
        let store = TerritoryStore::new();
        let client = reqwest::Client::new();
        let handle = spawn_load(&store, client.clone(), DatasetSource::File(fixture()))
            .expect("first load starts");
        assert!(spawn_load(&store, client, DatasetSource::File(fixture())).is_none());

        assert_eq!(handle.await.unwrap(), Completion::Applied);
        assert_eq!(store.status(), DatasetStatus::Ready);
    }

    #[tokio::test]
    async fn failed_load_leaves_store_unavailable() {
        let store = TerritoryStore::new();
        let source = DatasetSource::File(PathBuf::from("/nonexistent/territories.geojson"));
        let handle = spawn_load(&store, reqwest::Client::new(), source).unwrap();
        assert_eq!(handle.await.unwrap(), Completion::Applied);
        assert_eq!(store.status(), DatasetStatus::Unavailable);
        assert!(store.failure().unwrap().contains("failed to read"));
    }

    #[tokio::test]
    async fn dropping_the_store_discards_the_result() {
        let store = TerritoryStore::new();
        let handle =
            spawn_load(&store, reqwest::Client::new(), DatasetSource::File(fixture())).unwrap();
        drop(store);
        assert_eq!(handle.await.unwrap(), Completion::Discarded);
    }

    #[tokio::test]
    async fn aborted_load_is_reported_unavailable() {
        let store = TerritoryStore::new();
        let handle =
            spawn_load(&store, reqwest::Client::new(), DatasetSource::File(fixture())).unwrap();
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
        assert_eq!(store.status(), DatasetStatus::Unavailable);
        assert_eq!(store.failure().as_deref(), Some(territory::ABANDONED_LOAD));
    }
}
