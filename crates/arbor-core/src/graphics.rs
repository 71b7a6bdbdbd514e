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

//! The narrow seam through which the lifecycle core talks to graphics.
//!
//! The core never renders; it only asks the active backend to bring itself up
//! once configuration has been applied. Headless deployments plug in a
//! null backend, windowed ones a real surface-backed implementation, and the
//! adapter logic stays identical either way.

/// Contract for the graphics collaborator consumed by adapter variants.
///
/// Implementations must tolerate being called exactly once, on the main
/// thread, after configuration has been applied. Initialization has no
/// failure mode visible to the lifecycle core; an implementation that cannot
/// come up should abort the process with a diagnostic.
pub trait GraphicsBackend: Send + Sync {
    /// Brings the backend up. Called on the main thread via a scheduled
    /// runnable, never directly from the config-application call.
    fn initialize(&self);

    /// Short human-readable backend name for diagnostics.
    fn name(&self) -> &str;
}
