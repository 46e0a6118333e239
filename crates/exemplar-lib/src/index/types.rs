use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::config::VECTOR_BYTE_LEN;

/// Stored vector data in one of two persisted forms.
///
/// Older index files store vectors as raw JSON number arrays; newer ones
/// store a base64 string of the little-endian f32 buffer. Both deserialize
/// here and [`VectorEncoding::normalize`] converts `Base64` to `Raw` once
/// at load time.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum VectorEncoding {
    Raw(Vec<f32>),
    Base64(String),
}

impl VectorEncoding {
    /// Encode a vector into the compact base64 persisted form.
    #[must_use]
    pub fn encode(vector: &[f32]) -> Self {
        let mut buf = Vec::with_capacity(vector.len() * 4);
        for value in vector {
            buf.extend_from_slice(&value.to_le_bytes());
        }
        Self::Base64(STANDARD.encode(buf))
    }

    /// Convert a `Base64` entry into `Raw` in place.
    ///
    /// Entries that fail to decode, or whose buffer is not exactly the
    /// expected byte length, are left unconverted. They stay in the item
    /// list but are invisible to search.
    pub fn normalize(&mut self) {
        let Self::Base64(encoded) = self else {
            return;
        };
        let Ok(bytes) = STANDARD.decode(encoded.as_bytes()) else {
            return;
        };
        if bytes.len() != VECTOR_BYTE_LEN {
            return;
        }
        let floats: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        *self = Self::Raw(floats);
    }

    /// The numeric vector, if this entry is in normalized form.
    pub fn as_raw(&self) -> Option<&[f32]> {
        match self {
            Self::Raw(v) => Some(v),
            Self::Base64(_) => None,
        }
    }
}

/// Descriptive metadata attached to an index item.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ItemMetadata {
    /// Snippet file name under the vectors directory.
    pub name: String,
    /// Language the snippet demonstrates (e.g. `javascript.v3`).
    pub language: String,
    /// Optional source path the snippet was ingested from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// One entry in the persisted vector index.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IndexItem {
    pub id: String,
    pub metadata: ItemMetadata,
    pub vector: VectorEncoding,
}

impl IndexItem {
    /// Create an item with a fresh id and a base64-encoded vector.
    #[must_use]
    pub fn new(metadata: ItemMetadata, vector: &[f32]) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            metadata,
            vector: VectorEncoding::encode(vector),
        }
    }
}

/// On-disk shape of the index file.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IndexFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub items: Vec<IndexItem>,
}

fn default_version() -> u32 {
    1
}

impl IndexFile {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: 1,
            items: Vec::new(),
        }
    }
}
