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

//! The no-display graphics backend used by headless deployments.

use arbor_core::graphics::GraphicsBackend;
use std::sync::atomic::{AtomicBool, Ordering};

/// A [`GraphicsBackend`] with no display surface behind it.
///
/// Windowed adapters kick off screen creation when config is applied, which
/// then drives the rest of app bootstrapping. Headless deployments initialize
/// this null backend purely for the same sequencing effect: downstream
/// subsystems observe "graphics is ready" without any surface existing.
#[derive(Debug, Default)]
pub struct NullGraphicsBackend {
    initialized: AtomicBool,
}

impl NullGraphicsBackend {
    /// Creates an uninitialized null backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once [`GraphicsBackend::initialize`] has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }
}

impl GraphicsBackend for NullGraphicsBackend {
    fn initialize(&self) {
        let was_initialized = self.initialized.swap(true, Ordering::SeqCst);
        if was_initialized {
            log::warn!("Null graphics backend initialized more than once.");
        } else {
            log::info!("Null graphics backend initialized; no display surface will exist.");
        }
    }

    fn name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_flips_the_flag() {
        let backend = NullGraphicsBackend::new();
        assert!(!backend.is_initialized());
        backend.initialize();
        assert!(backend.is_initialized());
        assert_eq!(backend.name(), "null");
    }
}
