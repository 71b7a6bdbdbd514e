// Copyright 2026 the Arbor authors
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

//! The headless runtime binary.
//!
//! Bootstraps one [`HeadlessAdapter`] and drives its lifecycle in the fixed
//! order: start, apply config, run to completion. Subsystems that need to
//! schedule main-thread work receive a cloned
//! [`MainThreadHandle`](arbor_core::MainThreadHandle) — here the stdin
//! watcher, which requests exit when the controlling terminal says so.

mod config;

use anyhow::Result;
use arbor_core::adapter::AppAdapter;
use arbor_core::event_loop::MainThreadHandle;
use arbor_infra::{HeadlessAdapter, NullGraphicsBackend};
use config::RuntimeConfig;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => RuntimeConfig::load(Path::new(&path))?,
        None => RuntimeConfig::default(),
    };
    log::info!("Starting '{}' (headless).", config.app_name);

    let graphics = Arc::new(NullGraphicsBackend::new());
    let mut adapter = HeadlessAdapter::new(graphics);

    // The fixed bootstrap sequence: this thread becomes the main thread,
    // config application schedules graphics bring-up, then we pump until an
    // exit is requested.
    adapter.start_app();
    adapter.apply_config();

    if config.watch_stdin {
        watch_stdin(adapter.main_thread_handle());
    }

    adapter.run_to_completion();
    log::info!("'{}' shut down cleanly.", config.app_name);
    Ok(())
}

/// Requests exit when stdin closes or reads a `quit` line.
fn watch_stdin(handle: MainThreadHandle) {
    thread::Builder::new()
        .name("stdin-watcher".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(text) if text.trim() == "quit" => break,
                    Ok(_) => continue,
                    Err(_) => break,
                }
            }
            log::info!("Stdin closed or 'quit' received; requesting exit.");
            handle.request_exit();
        })
        .expect("failed to spawn stdin watcher thread");
}
