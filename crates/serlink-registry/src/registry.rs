use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};

/// One entry in the message type catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageType {
    /// Wire identifier carried in the frame header.
    pub id: u8,
    /// Short semantic name, e.g. `"adc_reading"`.
    pub name: String,
    /// Declared payload interpretation. Informational; the protocol layer
    /// never parses payloads.
    pub data_type: String,
    /// Human description.
    #[serde(default)]
    pub description: String,
}

/// On-disk catalog document shape.
#[derive(Debug, Deserialize)]
struct TypeDocument {
    message_types: Vec<MessageType>,
}

/// Read-only mapping from wire type ids to message type metadata.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<u8, MessageType>,
}

impl TypeRegistry {
    /// Build a catalog from already-constructed entries.
    pub fn from_types(types: impl IntoIterator<Item = MessageType>) -> Result<Self> {
        let mut map = HashMap::new();
        for entry in types {
            let id = entry.id;
            if map.insert(id, entry).is_some() {
                return Err(RegistryError::DuplicateId(id));
            }
        }
        debug!(count = map.len(), "message type catalog built");
        Ok(Self { types: map })
    }

    /// Parse a catalog from a JSON document string.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: TypeDocument = serde_json::from_str(json)?;
        Self::from_types(document.message_types)
    }

    /// Load a catalog from a JSON file with default limits.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with_config(path, RegistryConfig::default())
    }

    /// Load a catalog from a JSON file with explicit limits.
    pub fn from_path_with_config(path: impl AsRef<Path>, config: RegistryConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|err| RegistryError::LoadFailed(format!("{}: {err}", path.display())))?;

        let metadata = file
            .metadata()
            .map_err(|err| RegistryError::LoadFailed(err.to_string()))?;
        if metadata.len() > config.max_file_size as u64 {
            return Err(RegistryError::LoadFailed(format!(
                "message type document too large ({} bytes, max {}): {}",
                metadata.len(),
                config.max_file_size,
                path.display()
            )));
        }

        let read_limit = u64::try_from(config.max_file_size.saturating_add(1)).unwrap_or(u64::MAX);
        let mut content = String::new();
        file.take(read_limit)
            .read_to_string(&mut content)
            .map_err(|err| {
                RegistryError::LoadFailed(format!("failed reading {}: {err}", path.display()))
            })?;
        if content.len() > config.max_file_size {
            return Err(RegistryError::LoadFailed(format!(
                "message type document grew past the limit while reading: {}",
                path.display()
            )));
        }

        Self::from_json(&content)
    }

    /// Look up a message type by wire id.
    pub fn get(&self, id: u8) -> Option<&MessageType> {
        self.types.get(&id)
    }

    /// Whether the catalog contains the given wire id.
    pub fn contains(&self, id: u8) -> bool {
        self.types.contains_key(&id)
    }

    /// Look up a message type by its semantic name.
    pub fn find_by_name(&self, name: &str) -> Option<&MessageType> {
        self.types.values().find(|entry| entry.name == name)
    }

    /// Catalog ids in ascending order.
    pub fn ids(&self) -> Vec<u8> {
        let mut ids: Vec<u8> = self.types.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Catalog entries in ascending id order.
    pub fn entries(&self) -> Vec<&MessageType> {
        let mut entries: Vec<&MessageType> = self.types.values().collect();
        entries.sort_unstable_by_key(|entry| entry.id);
        entries
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
