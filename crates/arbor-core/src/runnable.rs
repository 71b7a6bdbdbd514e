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

//! The unit of deferred work executed by an event loop.

/// An opaque, owned unit of deferred work.
///
/// Ownership of a runnable transfers to the queue when it is enqueued; the
/// loop invokes [`run`](Runnable::run) exactly once on the loop's thread and
/// then releases it.
pub trait Runnable: Send {
    /// Consumes the runnable and performs its work.
    fn run(self: Box<Self>);
}

// Any sendable closure is a runnable. This blanket impl lets call sites push
// plain closures without wrapping them in a named type.
impl<F: FnOnce() + Send> Runnable for F {
    fn run(self: Box<Self>) {
        (*self)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn closure_is_a_runnable() {
        let fired = Arc::new(AtomicBool::new(false));
        let fired_clone = fired.clone();

        let runnable: Box<dyn Runnable> = Box::new(move || {
            fired_clone.store(true, Ordering::SeqCst);
        });
        runnable.run();

        assert!(fired.load(Ordering::SeqCst));
    }
}
