// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
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

//! Core emulation components
//!
//! This module contains the display controller emulation:
//! - Pixel plane (format-specific VRAM bit packing)
//! - Display memory (viewport, plane offset, dirty region)
//! - Controller (command state machine and payload transfer)
//! - Protocol (command catalog, frame builder, SPI bridge, traces)
//! - Configuration and errors

pub mod config;
pub mod controller;
pub mod error;
pub mod memory;
pub mod plane;
pub mod protocol;

// Re-export commonly used types
pub use config::ControllerConfig;
pub use controller::Controller;
pub use error::{DisplayError, EmulatorError, Result};
pub use memory::{Display, DisplayMemory, Rect};
pub use plane::{PixelFormat, PixelPlane};
pub use protocol::{Frame, SpiBridge, Trace};
