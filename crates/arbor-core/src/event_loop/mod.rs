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

//! A thread-affine FIFO runnable queue with blocking pump and cooperative exit.
//!
//! An [`EventLoop`] is bound to exactly one thread: either the thread that
//! created it ([`ThreadSource::WrapCurrent`]) or a dedicated thread spun up at
//! construction ([`ThreadSource::Spawn`]). Work reaches the loop's thread only
//! through [`EventLoop::push_runnable`] (or a vended [`MainThreadHandle`]),
//! which is safe to call from any thread. Pumping and exiting follow a
//! cooperative model: [`EventLoop::request_exit`] asks the pump to wind down,
//! it never cancels queued work.

use std::fmt;

mod handle;
mod pump;

pub use self::handle::MainThreadHandle;
pub use self::pump::EventLoop;

/// Logical identity of an event loop, distinguishing it among possibly
/// multiple loops in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLoopRole {
    /// The application's primary thread of execution.
    Main,
    /// An auxiliary loop identified by a static label.
    Named(&'static str),
}

impl EventLoopRole {
    /// Returns the human-readable label for this role.
    pub fn label(&self) -> &'static str {
        match self {
            EventLoopRole::Main => "main",
            EventLoopRole::Named(name) => name,
        }
    }
}

impl fmt::Display for EventLoopRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How an [`EventLoop`] acquires its thread.
///
/// Both modes yield the same post-construction interface, so code driving the
/// loop stays mode-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadSource {
    /// Adopt the calling thread. Construction does not start pumping; the
    /// owner later calls [`EventLoop::run_to_completion`] from that thread.
    WrapCurrent,
    /// Spin up a dedicated thread that begins pumping immediately.
    /// Construction returns without blocking.
    Spawn,
}

/// Observable run state of an event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RunState {
    /// Constructed, not yet pumping.
    Idle = 0,
    /// The loop's thread is inside the pump.
    Running = 1,
    /// An exit has been requested but the pump has not yet wound down.
    ExitRequested = 2,
    /// The pump has returned; no further runnables will execute.
    Stopped = 3,
}

impl RunState {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => RunState::Idle,
            1 => RunState::Running,
            2 => RunState::ExitRequested,
            3 => RunState::Stopped,
            _ => unreachable!("invalid RunState discriminant: {value}"),
        }
    }
}
