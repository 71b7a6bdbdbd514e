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

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};

use crate::runnable::Runnable;

use super::{EventLoopRole, MainThreadHandle, RunState, ThreadSource};

/// What travels over the loop's channel: either work to execute or the wake-up
/// marker pushed by the first `request_exit` call.
pub(super) enum Message {
    Run(Box<dyn Runnable>),
    Exit,
}

/// State shared between the loop, its vended handles, and (in spawn mode) its
/// dedicated thread.
pub(super) struct LoopShared {
    state: AtomicU8,
    exit_requested: AtomicBool,
}

impl LoopShared {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(RunState::Idle as u8),
            exit_requested: AtomicBool::new(false),
        }
    }

    pub(super) fn state(&self) -> RunState {
        RunState::from_u8(self.state.load(Ordering::SeqCst))
    }

    fn set_state(&self, state: RunState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    fn exit_requested(&self) -> bool {
        self.exit_requested.load(Ordering::SeqCst)
    }
}

/// A single-thread-bound runnable queue with run/stop semantics.
///
/// The queue is a [`flume`] unbounded MPSC channel: `push_runnable` is safe
/// from any thread, never blocks the caller, and preserves global FIFO order
/// in which enqueue calls complete. All runnables execute on the loop's thread.
///
/// Exit policy: once an exit is requested, the pump executes everything still
/// in the queue at the moment it observes the request, then stops. Runnables
/// pushed after the loop has stopped are dropped with a warning.
pub struct EventLoop {
    role: EventLoopRole,
    sender: flume::Sender<Message>,
    receiver: flume::Receiver<Message>,
    shared: Arc<LoopShared>,
    thread_id: ThreadId,
    worker: Option<JoinHandle<()>>,
}

impl EventLoop {
    /// Creates a new event loop bound according to `source`.
    ///
    /// With [`ThreadSource::WrapCurrent`] the calling thread becomes the
    /// loop's thread and nothing is pumped until
    /// [`run_to_completion`](Self::run_to_completion). With
    /// [`ThreadSource::Spawn`] a dedicated thread starts pumping immediately
    /// and this call returns without blocking.
    pub fn new(role: EventLoopRole, source: ThreadSource) -> Self {
        let (sender, receiver) = flume::unbounded();
        let shared = Arc::new(LoopShared::new());

        let (thread_id, worker) = match source {
            ThreadSource::WrapCurrent => {
                log::debug!("Event loop '{role}' wrapping current thread.");
                (thread::current().id(), None)
            }
            ThreadSource::Spawn => {
                let pump_receiver = receiver.clone();
                let pump_shared = shared.clone();
                let handle = thread::Builder::new()
                    .name(format!("event-loop-{role}"))
                    .spawn(move || pump(&pump_receiver, &pump_shared))
                    .unwrap_or_else(|err| {
                        panic!("failed to spawn thread for event loop '{role}': {err}")
                    });
                log::debug!("Event loop '{role}' pumping on a dedicated thread.");
                (handle.thread().id(), Some(handle))
            }
        };

        Self {
            role,
            sender,
            receiver,
            shared,
            thread_id,
            worker,
        }
    }

    /// Returns this loop's role tag.
    pub fn role(&self) -> EventLoopRole {
        self.role
    }

    /// Returns the loop's current run state.
    pub fn state(&self) -> RunState {
        self.shared.state()
    }

    /// Returns `true` if the calling thread is the loop's thread.
    pub fn is_loop_thread(&self) -> bool {
        thread::current().id() == self.thread_id
    }

    /// Appends `runnable` to the tail of the queue.
    ///
    /// Safe from any thread and never blocks the caller. The runnable will
    /// eventually execute on the loop's thread, in FIFO order relative to
    /// other enqueued runnables. If the loop has already stopped, the runnable
    /// is dropped with a warning; callers must not rely on post-stop
    /// scheduling.
    pub fn push_runnable(&self, runnable: Box<dyn Runnable>) {
        push(self.role, &self.sender, &self.shared, runnable);
    }

    /// Repeatedly dequeues and executes runnables, blocking while the queue
    /// is empty, until an exit request is observed and the pre-exit queue is
    /// drained.
    ///
    /// Callable only from the loop's own thread; calling it from any other
    /// thread is a programming error and panics. If an exit was requested
    /// before this call, the queue is drained and the call returns without
    /// blocking.
    pub fn run_to_completion(&mut self) {
        if !self.is_loop_thread() {
            panic!(
                "run_to_completion for event loop '{}' called from thread {:?}, \
                 which is not the loop's thread",
                self.role,
                thread::current().id()
            );
        }
        match self.state() {
            RunState::Running => {
                panic!("event loop '{}' is already running", self.role)
            }
            RunState::Stopped => {
                panic!("event loop '{}' has already stopped", self.role)
            }
            RunState::Idle | RunState::ExitRequested => {}
        }

        log::debug!("Event loop '{}' running to completion.", self.role);
        pump(&self.receiver, &self.shared);
        log::debug!("Event loop '{}' stopped.", self.role);
    }

    /// Requests that the pump wind down.
    ///
    /// Safe from any thread and idempotent: calls after the first have no
    /// additional effect. A currently-blocked
    /// [`run_to_completion`](Self::run_to_completion) wakes, finishes the
    /// queued work, and returns. Queued runnables are not cancelled.
    pub fn request_exit(&self) {
        request_exit(self.role, &self.sender, &self.shared);
    }

    /// Vends a cheaply-cloneable handle through which other subsystems can
    /// schedule work onto this loop or request exit, without owning the loop.
    pub fn handle(&self) -> MainThreadHandle {
        MainThreadHandle::new(self.role, self.sender.clone(), self.shared.clone())
    }
}

impl Drop for EventLoop {
    /// Winds down the dedicated thread in spawn mode. Wrap-current loops have
    /// nothing to join.
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.request_exit();
            if worker.join().is_err() {
                log::error!("Event loop '{}' thread panicked.", self.role);
            }
        }
    }
}

/// The dequeue/execute cycle, shared by wrap-current and spawn modes.
fn pump(receiver: &flume::Receiver<Message>, shared: &LoopShared) {
    if !shared.exit_requested() {
        shared.set_state(RunState::Running);
    }

    while !shared.exit_requested() {
        match receiver.recv() {
            Ok(Message::Run(runnable)) => runnable.run(),
            // The exit flag is set before the marker is sent, so observing the
            // marker means the flag is visible too.
            Ok(Message::Exit) => break,
            // All senders gone; nothing can ever arrive again.
            Err(flume::RecvError::Disconnected) => break,
        }
    }

    // Drain work that was queued before the exit request was observed.
    // Anything still arriving during this drain executes as well; anything
    // arriving after the loop stops is dropped at the push site.
    while let Ok(message) = receiver.try_recv() {
        if let Message::Run(runnable) = message {
            runnable.run();
        }
    }

    shared.set_state(RunState::Stopped);
}

pub(super) fn push(
    role: EventLoopRole,
    sender: &flume::Sender<Message>,
    shared: &LoopShared,
    runnable: Box<dyn Runnable>,
) {
    if shared.state() == RunState::Stopped {
        log::warn!("Runnable pushed to stopped event loop '{role}'; dropping it.");
        return;
    }
    if sender.send(Message::Run(runnable)).is_err() {
        log::warn!("Event loop '{role}' queue is gone; dropping runnable.");
    }
}

pub(super) fn request_exit(
    role: EventLoopRole,
    sender: &flume::Sender<Message>,
    shared: &LoopShared,
) {
    // swap makes repeat calls no-ops.
    if shared.exit_requested.swap(true, Ordering::SeqCst) {
        return;
    }
    // Only a loop that has not stopped can move to ExitRequested.
    let _ = shared.state.compare_exchange(
        RunState::Idle as u8,
        RunState::ExitRequested as u8,
        Ordering::SeqCst,
        Ordering::SeqCst,
    );
    let _ = shared.state.compare_exchange(
        RunState::Running as u8,
        RunState::ExitRequested as u8,
        Ordering::SeqCst,
        Ordering::SeqCst,
    );
    log::debug!("Exit requested for event loop '{role}'.");
    // Wake a blocked recv. Ignore failure: the pump may already be gone.
    let _ = sender.send(Message::Exit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) -> Box<dyn Runnable>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_clone = log.clone();
        let make = move |value: u32| -> Box<dyn Runnable> {
            let log = log_clone.clone();
            Box::new(move || log.lock().unwrap().push(value))
        };
        (log, make)
    }

    #[test]
    fn runnables_execute_in_fifo_order() {
        let (log, make) = recorder();
        let mut event_loop = EventLoop::new(EventLoopRole::Main, ThreadSource::WrapCurrent);

        for value in 0..8 {
            event_loop.push_runnable(make(value));
        }
        event_loop.request_exit();
        event_loop.run_to_completion();

        assert_eq!(*log.lock().unwrap(), (0..8).collect::<Vec<_>>());
        assert_eq!(event_loop.state(), RunState::Stopped);
    }

    #[test]
    fn concurrent_pushes_run_exactly_once_in_per_producer_order() {
        const PRODUCERS: u32 = 4;
        const PER_PRODUCER: u32 = 50;

        let (log, _) = recorder();
        let mut event_loop = EventLoop::new(EventLoopRole::Main, ThreadSource::WrapCurrent);
        let handle = event_loop.handle();

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let handle = handle.clone();
                let log = log.clone();
                thread::spawn(move || {
                    for i in 0..PER_PRODUCER {
                        let log = log.clone();
                        let value = producer * PER_PRODUCER + i;
                        handle.push_runnable(Box::new(move || {
                            log.lock().unwrap().push(value)
                        }));
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        event_loop.request_exit();
        event_loop.run_to_completion();

        let executed = log.lock().unwrap();
        // Exactly once each.
        assert_eq!(executed.len(), (PRODUCERS * PER_PRODUCER) as usize);
        let mut sorted = executed.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..PRODUCERS * PER_PRODUCER).collect::<Vec<_>>());
        // Per-producer FIFO order is preserved in the interleaving.
        for producer in 0..PRODUCERS {
            let this_producer: Vec<_> = executed
                .iter()
                .copied()
                .filter(|v| v / PER_PRODUCER == producer)
                .collect();
            let expected: Vec<_> =
                (producer * PER_PRODUCER..(producer + 1) * PER_PRODUCER).collect();
            assert_eq!(this_producer, expected);
        }
    }

    #[test]
    fn exit_is_idempotent() {
        let (log, make) = recorder();
        let mut event_loop = EventLoop::new(EventLoopRole::Main, ThreadSource::WrapCurrent);

        event_loop.push_runnable(make(1));
        event_loop.request_exit();
        event_loop.request_exit();
        event_loop.request_exit();
        assert_eq!(event_loop.state(), RunState::ExitRequested);

        // Starts already exit-requested: drains and returns without blocking.
        event_loop.run_to_completion();

        assert_eq!(*log.lock().unwrap(), vec![1]);
        assert_eq!(event_loop.state(), RunState::Stopped);
    }

    #[test]
    fn exit_from_another_thread_wakes_a_blocked_pump() {
        let mut event_loop = EventLoop::new(EventLoopRole::Main, ThreadSource::WrapCurrent);
        let handle = event_loop.handle();

        let exiter = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            handle.request_exit();
        });

        // Blocks on the empty queue until the worker's exit request arrives.
        event_loop.run_to_completion();
        exiter.join().unwrap();

        assert_eq!(event_loop.state(), RunState::Stopped);
    }

    #[test]
    fn run_from_wrong_thread_is_fatal() {
        let event_loop = EventLoop::new(EventLoopRole::Main, ThreadSource::WrapCurrent);

        // Move the loop to a different thread; the affinity check must trip.
        let offender = thread::spawn(move || {
            let mut event_loop = event_loop;
            event_loop.run_to_completion();
        });
        assert!(offender.join().is_err());
    }

    #[test]
    fn push_after_stop_is_dropped() {
        let (log, make) = recorder();
        let mut event_loop = EventLoop::new(EventLoopRole::Main, ThreadSource::WrapCurrent);

        event_loop.request_exit();
        event_loop.run_to_completion();

        event_loop.push_runnable(make(99));
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(event_loop.state(), RunState::Stopped);
    }

    #[test]
    fn spawned_loop_pumps_on_its_own_thread() {
        let event_loop = EventLoop::new(EventLoopRole::Named("worker"), ThreadSource::Spawn);
        assert!(!event_loop.is_loop_thread());

        let (sender, receiver) = flume::unbounded();
        event_loop.push_runnable(Box::new(move || {
            sender.send(thread::current().id()).unwrap();
        }));

        let executed_on = receiver
            .recv_timeout(Duration::from_secs(1))
            .expect("runnable did not execute");
        assert_ne!(executed_on, thread::current().id());

        // Drop joins the dedicated thread after requesting exit.
        drop(event_loop);
    }
}
