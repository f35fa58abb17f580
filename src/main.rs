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

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use mpu_layout::debug::init_logging;
use mpu_layout::mpu::{Coalesce, Passthrough, RegionMerge, RegionPlanner};
use mpu_layout::{parse_block_spec, plan_map, report, MemoryMap};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum MergeMode {
    /// Report regions exactly as planned
    Passthrough,
    /// Fold equal adjacent regions into larger ones
    Coalesce,
}

/// Compute ARMv7-M MPU region layouts for a memory map.
#[derive(Parser, Debug)]
#[command(name = "mpu-layout", version)]
struct Cli {
    /// JSON memory map: {"blocks": [{"name", "base", "size"}, ...]}
    #[arg(short = 'm', long = "map")]
    map: Option<PathBuf>,

    /// Extra block as name@base:size, e.g. sram@0x20000000:384K (repeatable)
    #[arg(short = 'b', long = "block")]
    blocks: Vec<String>,

    /// Only plan the named blocks (repeatable)
    #[arg(long = "only")]
    only: Vec<String>,

    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[arg(long = "merge", value_enum, default_value_t = MergeMode::Passthrough)]
    merge: MergeMode,

    /// Enable debug output
    #[arg(short = 'd', long = "debug", default_value_t = false)]
    debug: bool,
}

fn build_map(cli: &Cli) -> Result<MemoryMap> {
    let mut map = match &cli.map {
        Some(path) => MemoryMap::load(path)?,
        // the reference board is only used when nothing else is given
        None if !cli.blocks.is_empty() => MemoryMap::new(),
        None => MemoryMap::sample(),
    };
    for spec in &cli.blocks {
        let block = parse_block_spec(spec)?;
        map.push(block)
            .with_context(|| format!("while adding --block {}", spec))?;
    }
    if !cli.only.is_empty() {
        map.retain_names(&cli.only)?;
    }
    Ok(map)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.debug).context("failed to start logger")?;

    let map = build_map(&cli)?;
    log::debug!("Planning {} memory blocks", map.len());

    let merge: Box<dyn RegionMerge> = match cli.merge {
        MergeMode::Passthrough => Box::new(Passthrough),
        MergeMode::Coalesce => Box::new(Coalesce::default()),
    };
    let outcomes = plan_map(&RegionPlanner::default(), merge.as_ref(), &map);

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        log::warn!("{} of {} blocks could not be laid out", failed, outcomes.len());
    }

    match cli.format {
        OutputFormat::Text => print!("{}", report::render_text(&outcomes)),
        OutputFormat::Json => println!("{}", report::render_json(&outcomes)?),
    }
    Ok(())
}
