// Copyright (c) 2026 MCU-Debug Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Memory maps: the built-in sample, JSON map files and `name@base:size`
//! command-line entries.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::memory::MemoryBlock;
use crate::mpu::table::KB;
use crate::utils::parse_literal;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read memory map {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("memory map {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("bad {field} literal {value:?} for block {block:?}")]
    BadLiteral {
        block: String,
        field: &'static str,
        value: String,
    },
    #[error("block spec {0:?} is not of the form name@base:size")]
    BadBlockSpec(String),
    #[error("duplicate memory block {0:?}")]
    DuplicateBlock(String),
    #[error("no memory block named {0:?}")]
    UnknownBlock(String),
}

/// Address or size as written in a map file: a JSON integer, or a string
/// understood by [`parse_literal`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Literal {
    Number(u64),
    Text(String),
}

impl Literal {
    fn resolve(&self, block: &str, field: &'static str) -> Result<u64, ConfigError> {
        match self {
            Literal::Number(n) => Ok(*n),
            Literal::Text(s) => parse_literal(s).ok_or_else(|| ConfigError::BadLiteral {
                block: block.to_string(),
                field,
                value: s.clone(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BlockEntry {
    name: String,
    base: Literal,
    size: Literal,
}

#[derive(Debug, Deserialize)]
struct MapFile {
    blocks: Vec<BlockEntry>,
}

/// Ordered list of memory blocks, names unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryMap {
    blocks: Vec<MemoryBlock>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// rom, sram and dram of the reference board.
    pub fn sample() -> Self {
        Self {
            blocks: vec![
                MemoryBlock::new("rom", 0x0000_0000, 1024 * KB),
                MemoryBlock::new("sram", 0x2000_0000, 384 * KB),
                MemoryBlock::new("dram", 0x6000_0000, 1000 * KB),
            ],
        }
    }

    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let file: MapFile = serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: origin.to_path_buf(),
            source,
        })?;

        let mut map = Self::new();
        for entry in file.blocks {
            let base = entry.base.resolve(&entry.name, "base")?;
            let size = entry.size.resolve(&entry.name, "size")?;
            map.push(MemoryBlock::new(entry.name, base, size))?;
        }
        Ok(map)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::from_json_str(&text, path)?;
        log::info!("Loaded {} memory blocks from {}", map.len(), path.display());
        Ok(map)
    }

    pub fn push(&mut self, block: MemoryBlock) -> Result<(), ConfigError> {
        if self.get(&block.name).is_some() {
            return Err(ConfigError::DuplicateBlock(block.name));
        }
        self.blocks.push(block);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MemoryBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Keep only the named blocks, in map order.
    pub fn retain_names(&mut self, names: &[String]) -> Result<(), ConfigError> {
        if let Some(missing) = names.iter().find(|n| self.get(n).is_none()) {
            return Err(ConfigError::UnknownBlock(missing.clone()));
        }
        self.blocks.retain(|b| names.contains(&b.name));
        Ok(())
    }

    pub fn blocks(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Parse a `name@base:size` command-line block, e.g. `sram@0x20000000:384K`.
pub fn parse_block_spec(spec: &str) -> Result<MemoryBlock, ConfigError> {
    let bad = || ConfigError::BadBlockSpec(spec.to_string());
    let (name, range) = spec.split_once('@').ok_or_else(bad)?;
    let (base, size) = range.split_once(':').ok_or_else(bad)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(bad());
    }

    let literal = |field: &'static str, value: &str| {
        parse_literal(value).ok_or_else(|| ConfigError::BadLiteral {
            block: name.to_string(),
            field,
            value: value.to_string(),
        })
    };
    Ok(MemoryBlock::new(
        name,
        literal("base", base)?,
        literal("size", size)?,
    ))
}
