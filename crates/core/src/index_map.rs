//! Resolution of an exported-value index table against a registry.

use sensor_panel_types::IndexMap;
use std::collections::HashMap;
use thiserror::Error;

use crate::registry::{ChannelId, Registry};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexMapError {
    #[error("index {index} maps to unknown channel '{channel}'")]
    UnknownChannel { index: u32, channel: String },
    #[error("index {0} is mapped more than once")]
    DuplicateIndex(u32),
}

/// Where a resolved index writes to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexTarget {
    pub channel: ChannelId,
    pub scale: f64,
}

/// An [`IndexMap`] with channel names replaced by handles
#[derive(Debug, Clone, Default)]
pub struct ResolvedIndexMap {
    version: u32,
    targets: HashMap<u32, IndexTarget>,
}

impl ResolvedIndexMap {
    pub fn resolve(map: &IndexMap, registry: &Registry) -> Result<Self, IndexMapError> {
        let mut targets = HashMap::with_capacity(map.entries.len());
        for entry in &map.entries {
            let channel =
                registry
                    .lookup(&entry.channel)
                    .ok_or_else(|| IndexMapError::UnknownChannel {
                        index: entry.index,
                        channel: entry.channel.clone(),
                    })?;
            let target = IndexTarget {
                channel,
                scale: entry.scale,
            };
            if targets.insert(entry.index, target).is_some() {
                return Err(IndexMapError::DuplicateIndex(entry.index));
            }
        }
        Ok(Self {
            version: map.version,
            targets,
        })
    }

    pub fn get(&self, index: u32) -> Option<IndexTarget> {
        self.targets.get(&index).copied()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
