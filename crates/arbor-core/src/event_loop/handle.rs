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

use std::sync::Arc;

use crate::runnable::Runnable;

use super::pump::{self, LoopShared, Message};
use super::{EventLoopRole, RunState};

/// A cheap, cloneable scheduling handle onto an [`EventLoop`].
///
/// The bootstrapper hands one of these to every subsystem that needs to
/// schedule main-thread work, instead of exposing the loop (or a process-wide
/// global) itself. The handle supports exactly the two operations that are
/// safe from any thread: enqueueing a runnable and requesting exit.
///
/// [`EventLoop`]: super::EventLoop
#[derive(Clone)]
pub struct MainThreadHandle {
    role: EventLoopRole,
    sender: flume::Sender<Message>,
    shared: Arc<LoopShared>,
}

impl MainThreadHandle {
    pub(super) fn new(
        role: EventLoopRole,
        sender: flume::Sender<Message>,
        shared: Arc<LoopShared>,
    ) -> Self {
        Self {
            role,
            sender,
            shared,
        }
    }

    /// Appends `runnable` to the tail of the loop's queue.
    ///
    /// Same semantics as [`EventLoop::push_runnable`]: non-blocking, FIFO,
    /// dropped with a warning once the loop has stopped.
    ///
    /// [`EventLoop::push_runnable`]: super::EventLoop::push_runnable
    pub fn push_runnable(&self, runnable: Box<dyn Runnable>) {
        pump::push(self.role, &self.sender, &self.shared, runnable);
    }

    /// Convenience wrapper to push a plain closure.
    pub fn push<F: FnOnce() + Send + 'static>(&self, work: F) {
        self.push_runnable(Box::new(work));
    }

    /// Requests that the loop wind down. Idempotent, safe from any thread.
    pub fn request_exit(&self) {
        pump::request_exit(self.role, &self.sender, &self.shared);
    }

    /// Returns the loop's current run state.
    pub fn state(&self) -> RunState {
        self.shared.state()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{EventLoop, ThreadSource};
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn cloned_handles_feed_the_same_queue() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut event_loop = EventLoop::new(EventLoopRole::Main, ThreadSource::WrapCurrent);
        let handle = event_loop.handle();

        let workers: Vec<_> = (0..3)
            .map(|_| {
                let handle = handle.clone();
                let counter = counter.clone();
                thread::spawn(move || {
                    handle.push(move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                    });
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        handle.request_exit();
        event_loop.run_to_completion();

        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(handle.state(), RunState::Stopped);
    }
}
