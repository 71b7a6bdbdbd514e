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

//! The per-deployment-target lifecycle contract.
//!
//! An app adapter owns the main-thread [`EventLoop`](crate::EventLoop) and
//! mediates the fixed startup sequence the bootstrapper drives:
//! `start_app` → `apply_config` → `run_to_completion`, with `request_exit`
//! ending the run from anywhere. One concrete adapter exists per deployment
//! target (headless, windowed, ...); they differ only in how the main thread
//! is acquired and which [`GraphicsBackend`](crate::graphics::GraphicsBackend)
//! gets initialized, never in the scheduling surface they present.
//!
//! Precondition violations (wrong call order, wrong thread, double start) are
//! programming defects in the caller, not runtime conditions; adapters report
//! them by panicking with a diagnostic rather than returning errors.

use std::fmt;

use crate::event_loop::MainThreadHandle;
use crate::runnable::Runnable;

/// Where an adapter is in the fixed bootstrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStage {
    /// Constructed; `start_app` not yet called.
    Unstarted,
    /// Main event loop exists; config not yet applied.
    Started,
    /// The graphics-init runnable has been scheduled.
    ConfigApplied,
    /// The main loop pump is executing. Exit requests are tracked by the
    /// loop's own [`RunState`](crate::RunState), since they may arrive from
    /// any thread while the adapter's fields are main-thread-only.
    Running,
    /// The main loop pump has returned.
    Stopped,
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleStage::Unstarted => "unstarted",
            LifecycleStage::Started => "started",
            LifecycleStage::ConfigApplied => "config-applied",
            LifecycleStage::Running => "running",
            LifecycleStage::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// The capability set every adapter variant implements.
///
/// The bootstrapper calls [`start_app`](AppAdapter::start_app),
/// [`apply_config`](AppAdapter::apply_config), and
/// [`run_to_completion`](AppAdapter::run_to_completion) in that order, always
/// from the main thread. [`push_runnable`](AppAdapter::push_runnable) and
/// [`request_exit`](AppAdapter::request_exit) are legal from any thread once
/// `start_app` has run; subsystems living on other threads should instead be
/// handed a clone of [`main_thread_handle`](AppAdapter::main_thread_handle),
/// which carries exactly those two operations.
pub trait AppAdapter {
    /// Acquires or spins up the main-thread event loop. Main thread only;
    /// calling it twice is fatal.
    fn start_app(&mut self);

    /// Schedules graphics-backend initialization onto the main loop.
    ///
    /// Returns immediately; the backend comes up asynchronously when the
    /// scheduled runnable executes. The scheduled runnable is guaranteed to
    /// execute before any runnable enqueued after this call returns.
    fn apply_config(&mut self);

    /// Pumps the main event loop, blocking the calling (main) thread until an
    /// exit is requested and queued work has drained.
    fn run_to_completion(&mut self);

    /// Forwards `runnable` to the owned main loop. Fatal before
    /// [`start_app`](AppAdapter::start_app).
    fn push_runnable(&self, runnable: Box<dyn Runnable>);

    /// Requests termination of the main loop pump. Idempotent. Fatal before
    /// [`start_app`](AppAdapter::start_app).
    fn request_exit(&self);

    /// Vends a cloneable scheduling handle for dependency injection into
    /// subsystems. Fatal before [`start_app`](AppAdapter::start_app).
    fn main_thread_handle(&self) -> MainThreadHandle;

    /// Where the adapter currently is in the bootstrap sequence.
    fn stage(&self) -> LifecycleStage;
}
