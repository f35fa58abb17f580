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

//! Global debug flag and logger setup
use std::sync::OnceLock;

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Initialize the debug flag. Only the first call has an effect.
pub fn set_debug(enabled: bool) {
    DEBUG_ENABLED.set(enabled).ok();
}

/// Check if debug mode is enabled
pub fn is_debug() -> bool {
    *DEBUG_ENABLED.get().unwrap_or(&false)
}

/// Log spec used when `RUST_LOG` is not set.
pub fn default_log_spec(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

/// Start the logger. Everything goes to stderr so reports on stdout stay
/// machine-readable. Keep the returned handle alive for the whole run.
pub fn init_logging(debug: bool) -> Result<LoggerHandle, FlexiLoggerError> {
    set_debug(debug);
    Logger::try_with_env_or_str(default_log_spec(debug))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
}
