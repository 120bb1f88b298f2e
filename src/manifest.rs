//! Service Manifest Loading
//!
//! Reads Service snapshots from JSON documents such as the output of
//! `kubectl get services -o json`, so legacy endpoints can be computed
//! without a cluster connection.

use std::path::{Path, PathBuf};

use k8s_openapi::api::core::v1::Service;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file could not be read
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON or not a valid Service
    #[error("Invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document has no `kind` field
    #[error("Manifest has no kind")]
    MissingKind,

    /// Document or list item is not a Service
    #[error("Unsupported manifest kind: {0}")]
    UnsupportedKind(String),

    /// A list item failed to deserialize as a Service
    #[error("Invalid Service at item {index}: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct ItemList {
    items: Option<Vec<Value>>,
}

/// Load Services from a JSON manifest file
pub fn services_from_path(path: &Path) -> Result<Vec<Service>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "Read manifest");

    services_from_str(&content)
}

/// Load Services from a JSON document of kind `Service`, `ServiceList` or `List`
pub fn services_from_str(content: &str) -> Result<Vec<Service>, ManifestError> {
    let document: Value = serde_json::from_str(content)?;

    let kind = document
        .get("kind")
        .and_then(Value::as_str)
        .ok_or(ManifestError::MissingKind)?
        .to_string();

    match kind.as_str() {
        "Service" => Ok(vec![serde_json::from_value(document)?]),
        "ServiceList" | "List" => {
            let list: ItemList = serde_json::from_value(document)?;
            // Both a missing and a null item list mean no Services
            list.items
                .unwrap_or_default()
                .into_iter()
                .enumerate()
                .map(|(index, item)| service_from_item(index, item))
                .collect()
        }
        _ => Err(ManifestError::UnsupportedKind(kind)),
    }
}

fn service_from_item(index: usize, item: Value) -> Result<Service, ManifestError> {
    if let Some(kind) = item.get("kind").and_then(Value::as_str) {
        if kind != "Service" {
            return Err(ManifestError::UnsupportedKind(kind.to_string()));
        }
    }

    serde_json::from_value(item).map_err(|source| ManifestError::InvalidItem { index, source })
}
