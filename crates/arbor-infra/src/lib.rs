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

//! # Arbor Infra
//!
//! Concrete implementations of the contracts defined in `arbor-core`: the
//! headless app adapter and the null graphics backend it initializes.

#![warn(missing_docs)]

pub mod adapter;
pub mod graphics;

pub use adapter::HeadlessAdapter;
pub use graphics::NullGraphicsBackend;
