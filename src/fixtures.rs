//! Static album documents fed to, and expected back from, the staging deployment.

use crate::error::{Result, StagingError};
use rust_embed::RustEmbed;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Document API prefix for the `music` document type in the `staging` namespace.
pub const DOCUMENT_PATH_PREFIX: &str = "/document/v1/staging/music/docid/";

/// Names of the bundled album documents (resource `<name>.json`).
pub const ALBUM_FIXTURES: [&str; 3] = [
    "A-Head-Full-of-Dreams",
    "Hardwired...To-Self-Destruct",
    "Love-Is-Here-To-Stay",
];

#[derive(RustEmbed)]
#[folder = "resources/"]
struct BundledResources;

/// Returns the document path of the document with the given name.
pub fn document_path(name: &str) -> String {
    format!("{}{}", DOCUMENT_PATH_PREFIX, urlencoding::encode(name))
}

/// Where fixture bytes are read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FixtureSource {
    /// JSON files compiled into the binary from `resources/`.
    #[default]
    Bundled,
    /// `<dir>/<name>.json`, read at call time.
    Directory(PathBuf),
}

impl FixtureSource {
    /// Reads the verbatim bytes of resource `<name>.json`.
    pub fn load(&self, name: &str) -> Result<Vec<u8>> {
        let file = format!("{}.json", name);
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(StagingError::resource_not_found(
                file,
                "name must be a plain resource name",
            ));
        }

        match self {
            FixtureSource::Bundled => BundledResources::get(&file)
                .map(|embedded| embedded.data.into_owned())
                .ok_or_else(|| StagingError::resource_not_found(file, "not bundled")),
            FixtureSource::Directory(dir) => {
                let path = dir.join(&file);
                std::fs::read(&path).map_err(|e| {
                    StagingError::resource_not_found(file, format!("{}: {}", path.display(), e))
                })
            }
        }
    }

    /// Document paths and bytes for `names`, keyed by path.
    pub fn documents_by_path(&self, names: &[&str]) -> Result<BTreeMap<String, Vec<u8>>> {
        let mut documents = BTreeMap::new();
        for name in names {
            let bytes = self.load(name)?;
            documents.insert(document_path(name), bytes);
        }
        Ok(documents)
    }
}
