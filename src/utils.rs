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

use std::sync::OnceLock;

use regex::Regex;

fn literal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(0x[0-9a-f_]+|[0-9_]+)\s*(b|k|kb|kib|m|mb|mib|g|gb|gib)?\s*$")
            .expect("literal regex is valid")
    })
}

/// Parse an address or size literal.
///
/// Accepts `0x` hex or decimal, optionally followed by a binary unit suffix
/// (`K`, `KB`, `KiB`, `M`, ..., case-insensitive), e.g. `0x20000000`, `384K`,
/// `1MiB`. Returns `None` on malformed input or overflow.
pub fn parse_literal(text: &str) -> Option<u64> {
    let caps = literal_re().captures(text)?;
    let digits = caps[1].replace('_', "");
    let value = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u64>().ok()?,
    };

    let shift = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        None => 0,
        Some(unit) => match unit.chars().next() {
            Some('k') => 10,
            Some('m') => 20,
            Some('g') => 30,
            _ => 0,
        },
    };
    value.checked_mul(1u64 << shift)
}

/// Render a byte count with the largest exact binary unit, e.g. `384K`.
pub fn format_size(size: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1 << 30, "G"), (1 << 20, "M"), (1 << 10, "K")];
    for (unit, suffix) in UNITS {
        if size >= unit && size % unit == 0 {
            return format!("{}{}", size / unit, suffix);
        }
    }
    format!("{}B", size)
}
