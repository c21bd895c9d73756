// Copyright 2025 eraflo
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

//! Routes `log` records to both the console and the host.

use env_logger::{Builder, Env, Logger};
use krysalis_core::HostCallbacks;
use log::{Log, Metadata, Record};
use std::sync::Arc;

/// A [`Log`] implementation that writes each record through `env_logger` and
/// hands a one-line copy to the host's log callback.
///
/// Filtering follows `RUST_LOG` when set, and the configured default otherwise.
pub struct HostLogger {
    console: Logger,
    host: Arc<dyn HostCallbacks>,
}

impl HostLogger {
    /// Creates a logger that falls back to `default_filter` when `RUST_LOG` is unset.
    pub fn new(host: Arc<dyn HostCallbacks>, default_filter: &str) -> Self {
        let console = Builder::from_env(Env::default().default_filter_or(default_filter)).build();
        Self { console, host }
    }

    /// The most verbose level this logger lets through.
    pub fn max_level(&self) -> log::LevelFilter {
        self.console.filter()
    }

    /// Installs this logger as the global `log` backend.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.max_level();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

/// Formats a record the way the host receives it.
pub fn format_for_host(record: &Record) -> String {
    format!("[{} {}] {}", record.level(), record.target(), record.args())
}

impl Log for HostLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.console.matches(record) {
            return;
        }
        self.console.log(record);
        self.host.log(&format_for_host(record));
    }

    fn flush(&self) {
        self.console.flush();
    }
}

/// Installs a [`HostLogger`] unless a global logger is already set.
///
/// Returns `true` if this call installed the logger.
pub fn init(host: Arc<dyn HostCallbacks>, default_filter: &str) -> bool {
    HostLogger::new(host, default_filter).install().is_ok()
}
