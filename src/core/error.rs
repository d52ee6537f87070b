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

/// Emulator error types
use thiserror::Error;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Main error type for the emulator
///
/// Wraps display-level errors together with the failures that can only happen
/// at the application boundary (file I/O, config and trace parsing).
#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error("Display error: {0}")]
    Display(#[from] DisplayError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Trace parse error: {0}")]
    TraceParse(#[from] serde_json::Error),
}

/// Display memory and pixel addressing errors
///
/// These are the only errors the display core ever reports. Command and payload
/// processing never fail; see [`crate::core::controller::Controller`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    #[error("Pixel out of bounds: ({x}, {y})")]
    OutOfBounds { x: i32, y: i32 },

    #[error("Invalid display dimensions: {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },

    #[error(
        "Viewport {width}x{height} at column offset {column_offset} does not fit in a \
         {plane_width}x{plane_height} plane"
    )]
    PlaneTooSmall {
        width: u16,
        height: u16,
        column_offset: u16,
        plane_width: u16,
        plane_height: u16,
    },

    #[error("Color depth {color_depth} exceeds the {max} bits the pixel format stores")]
    ColorDepthTooLarge { color_depth: u8, max: u8 },
}
