use oxljsonld::ContextFetcher;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use url::Url;

/// A [`ContextFetcher`] reading the remote JSON-LD contexts from local files.
///
/// A context IRI is served from, in order:
/// 1. the file registered for it with [`with_file`](Self::with_file),
/// 2. the file itself for `file:` IRIs,
/// 3. the file of the directory given to [`new`](Self::new) named after the last non-empty
///    path segment of the IRI, or after its host if its path is empty.
///
/// ```
/// use oxljsonld::ContextFetcher;
/// use oxloader::FileContextFetcher;
///
/// let directory = tempfile::tempdir()?;
/// std::fs::write(directory.path().join("person.jsonld"), r#"{"@context": {}}"#)?;
///
/// let fetcher = FileContextFetcher::new(directory.path());
/// assert!(fetcher.fetch("http://example.com/contexts/person.jsonld").is_some());
/// assert!(fetcher.fetch("http://example.com/contexts/other.jsonld").is_none());
/// # Result::<_, std::io::Error>::Ok(())
/// ```
#[derive(Debug, Default, Clone)]
#[must_use]
pub struct FileContextFetcher {
    directory: Option<PathBuf>,
    files: FxHashMap<String, PathBuf>,
}

impl FileContextFetcher {
    /// Builds a fetcher looking for the contexts in `directory`.
    #[inline]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
            files: FxHashMap::default(),
        }
    }

    /// Serves the context at `iri` from `path`.
    #[inline]
    pub fn with_file(mut self, iri: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.files.insert(iri.into(), path.into());
        self
    }

    fn path_for(&self, iri: &str) -> Option<PathBuf> {
        if let Some(path) = self.files.get(iri) {
            return Some(path.clone());
        }
        let url = Url::parse(iri).ok()?;
        if url.scheme() == "file" {
            return url.to_file_path().ok();
        }
        let name = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .or_else(|| url.host_str())?;
        Some(self.directory.as_deref()?.join(name))
    }
}

impl ContextFetcher for FileContextFetcher {
    fn fetch(&self, iri: &str) -> Option<String> {
        let Some(path) = self.path_for(iri) else {
            debug!("No local file for the remote context {iri}");
            return None;
        };
        read(&path, iri)
    }
}

fn read(path: &Path, iri: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => {
            debug!("Read the remote context {iri} from {}", path.display());
            Some(content)
        }
        Err(e) => {
            warn!(
                "Failed to read the remote context {iri} from {}: {e}",
                path.display()
            );
            None
        }
    }
}
