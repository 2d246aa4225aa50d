//! Saving trees to and loading trees from JSON files.
//!
//! A saved file holds the tree's nodes in pre-order along with their heights and whether they had
//! children. Only the keys and values are read back: loading inserts every record in file order
//! and lets the tree rebalance itself, so the shape on disk never matters.
//!
//! # Examples
//!
//! ```
//! use avldb::avl::Tree;
//! use avldb::storage;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("database.json");
//!
//! // Nothing saved yet, so we get an empty tree.
//! assert!(storage::load(&path).is_empty());
//!
//! let tree: Tree = (1..=3).map(|k| (k, k.to_string())).collect();
//! storage::save(&tree, &path).unwrap();
//!
//! let loaded = storage::load(&path);
//! assert!(loaded.iter().eq(tree.iter()));
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::avl::{Exported, Tree};
use crate::error::StorageError;

#[derive(Serialize)]
struct Document<'a> {
    nodes: Vec<StoredNode<'a>>,
}

#[derive(Serialize)]
struct StoredNode<'a> {
    key: i32,
    value: &'a str,
    height: usize,
    left: bool,
    right: bool,
}

impl<'a> From<Exported<'a>> for StoredNode<'a> {
    fn from(node: Exported<'a>) -> Self {
        Self {
            key: node.key,
            value: node.value,
            height: node.height,
            left: node.has_left,
            right: node.has_right,
        }
    }
}

/// What loading reads out of a document. Heights and child markers (ours are booleans, older files
/// nest whole child objects there) aren't listed so serde skips them whatever their type.
#[derive(Deserialize)]
struct LoadedDocument {
    #[serde(default, alias = "Nodes")]
    nodes: Option<Vec<LoadedNode>>,
}

#[derive(Deserialize)]
struct LoadedNode {
    #[serde(alias = "Key")]
    key: i32,
    #[serde(default, alias = "Value")]
    value: Option<String>,
}

/// Writes the whole tree to `path`, replacing whatever was there.
///
/// Failures are logged before they're returned.
pub fn save(tree: &Tree, path: impl AsRef<Path>) -> Result<(), StorageError> {
    let path = path.as_ref();
    let result = write_document(tree, path);
    match &result {
        Ok(()) => tracing::debug!(path = %path.display(), records = tree.len(), "saved database"),
        Err(e) => tracing::error!("failed to save database: {e}"),
    }
    result
}

fn write_document(tree: &Tree, path: &Path) -> Result<(), StorageError> {
    let document = Document {
        nodes: tree.export().into_iter().map(StoredNode::from).collect(),
    };
    let json = serde_json::to_string_pretty(&document).map_err(StorageError::Encode)?;
    fs::write(path, json).map_err(|source| StorageError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Reads the tree stored at `path`.
///
/// A missing or blank file is an empty database. Anything that can't be read or parsed is logged
/// and also gives an empty tree, so this never fails.
pub fn load(path: impl AsRef<Path>) -> Tree {
    let path = path.as_ref();
    match try_load(path) {
        Ok(tree) => {
            tracing::debug!(path = %path.display(), records = tree.len(), "loaded database");
            tree
        }
        Err(e) => {
            tracing::warn!("failed to load database, starting empty: {e}");
            Tree::new()
        }
    }
}

/// Like [`load`] but hands back read and parse errors instead of swallowing them. A missing or
/// blank file is still an empty tree.
pub fn try_load(path: impl AsRef<Path>) -> Result<Tree, StorageError> {
    let path = path.as_ref();
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Tree::new()),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_owned(),
                source,
            })
        }
    };
    if json.trim().is_empty() {
        return Ok(Tree::new());
    }

    let document: LoadedDocument =
        serde_json::from_str(&json).map_err(|source| StorageError::Malformed {
            path: path.to_owned(),
            source,
        })?;

    Ok(document
        .nodes
        .unwrap_or_default()
        .into_iter()
        .map(|node| (node.key, node.value.unwrap_or_default()))
        .collect())
}
