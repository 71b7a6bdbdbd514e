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

//! The headless (no-display) app adapter variant.

use std::sync::Arc;

use arbor_core::adapter::{AppAdapter, LifecycleStage};
use arbor_core::event_loop::{EventLoop, EventLoopRole, MainThreadHandle, ThreadSource};
use arbor_core::graphics::GraphicsBackend;
use arbor_core::runnable::Runnable;

/// The reference adapter for deployments with no display surface.
///
/// Not being embedded into any platform event system, it spins up its very
/// own event loop for the main thread by wrapping the thread that calls
/// [`start_app`](AppAdapter::start_app); that thread is the main thread from
/// then on. Applying config initializes the injected graphics backend —
/// normally a [`NullGraphicsBackend`](crate::NullGraphicsBackend) — via a
/// scheduled runnable, so the "graphics ready" transition sequences exactly
/// like a windowed adapter's screen creation.
pub struct HeadlessAdapter {
    graphics: Arc<dyn GraphicsBackend>,
    main_loop: Option<EventLoop>,
    stage: LifecycleStage,
}

impl HeadlessAdapter {
    /// Creates an adapter that will initialize `graphics` when config is
    /// applied.
    pub fn new(graphics: Arc<dyn GraphicsBackend>) -> Self {
        Self {
            graphics,
            main_loop: None,
            stage: LifecycleStage::Unstarted,
        }
    }

    /// The owned main loop, or a fatal use-before-initialization diagnostic.
    fn main_loop(&self) -> &EventLoop {
        self.main_loop
            .as_ref()
            .unwrap_or_else(|| panic!("headless adapter used before start_app"))
    }

    fn assert_main_thread(&self, operation: &str) {
        if !self.main_loop().is_loop_thread() {
            panic!("{operation} called from a thread other than the main thread");
        }
    }
}

impl AppAdapter for HeadlessAdapter {
    fn start_app(&mut self) {
        if self.main_loop.is_some() {
            panic!("start_app called twice on headless adapter");
        }
        log::info!("Headless adapter starting; wrapping current thread as main.");
        self.main_loop = Some(EventLoop::new(
            EventLoopRole::Main,
            ThreadSource::WrapCurrent,
        ));
        self.stage = LifecycleStage::Started;
    }

    fn apply_config(&mut self) {
        self.assert_main_thread("apply_config");
        if self.stage != LifecycleStage::Started {
            panic!(
                "apply_config called in stage '{}'; expected 'started'",
                self.stage
            );
        }

        // Windowed adapters kick off screen creation here, which leads to the
        // remaining app bootstrapping. Initializing the injected backend from
        // a scheduled runnable gives headless runs the same sequencing.
        let graphics = self.graphics.clone();
        log::info!(
            "Scheduling '{}' graphics backend initialization.",
            graphics.name()
        );
        self.main_loop()
            .push_runnable(Box::new(move || graphics.initialize()));
        self.stage = LifecycleStage::ConfigApplied;
    }

    fn run_to_completion(&mut self) {
        if self.stage != LifecycleStage::ConfigApplied {
            panic!(
                "run_to_completion called in stage '{}'; expected 'config-applied'",
                self.stage
            );
        }
        self.stage = LifecycleStage::Running;
        // The loop itself panics if this is not the main thread.
        self.main_loop
            .as_mut()
            .unwrap_or_else(|| panic!("headless adapter used before start_app"))
            .run_to_completion();
        self.stage = LifecycleStage::Stopped;
        log::info!("Headless adapter main loop completed.");
    }

    fn push_runnable(&self, runnable: Box<dyn Runnable>) {
        self.main_loop().push_runnable(runnable);
    }

    fn request_exit(&self) {
        self.main_loop().request_exit();
    }

    fn main_thread_handle(&self) -> MainThreadHandle {
        self.main_loop().handle()
    }

    fn stage(&self) -> LifecycleStage {
        self.stage
    }
}
