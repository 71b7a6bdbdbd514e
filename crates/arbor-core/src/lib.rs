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

//! # Arbor Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! for the main-thread lifecycle controller.
//!
//! The two load-bearing pieces are the [`event_loop`] module (a thread-affine
//! FIFO runnable pump) and the [`adapter`] module (the per-deployment-target
//! lifecycle contract every adapter variant implements). Graphics is consumed
//! only through the narrow [`graphics::GraphicsBackend`] seam so that headless
//! and windowed deployments share identical control flow.

#![warn(missing_docs)]

pub mod adapter;
pub mod event_loop;
pub mod graphics;
pub mod runnable;

pub use adapter::{AppAdapter, LifecycleStage};
pub use event_loop::{EventLoop, EventLoopRole, MainThreadHandle, RunState, ThreadSource};
pub use runnable::Runnable;
