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

//! Controller configuration
//!
//! Fixed, construction-time description of a display: viewport size, packing
//! format and the geometry of the internal addressable plane. Configurations can
//! be built in code from presets or loaded from TOML.
//!
//! # Example
//!
//! ```
//! use oled_emu::core::config::ControllerConfig;
//! use oled_emu::core::plane::PixelFormat;
//!
//! let config = ControllerConfig::from_toml_str(
//!     r#"
//!     width = 128
//!     height = 64
//!     pixel_format = "packed_bit"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.pixel_format, PixelFormat::PackedBit);
//! assert_eq!(config.color_depth, 1);
//! assert_eq!(config.plane_width, 128);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{DisplayError, Result};
use crate::core::plane::PixelFormat;

/// SSD1322 internal column count
pub const SSD1322_PLANE_COLUMNS: u16 = 480;

/// First internal column that is wired to the panel on SSD1322 modules
pub const SSD1322_COLUMN_OFFSET: u16 = 28;

/// Display controller configuration
///
/// Fields left out of a TOML document fall back to [`ControllerConfig::default`],
/// except that a zero `plane_width`/`plane_height` and a zero `color_depth` are
/// derived from the viewport and format by [`ControllerConfig::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Visible width in pixels
    pub width: u16,

    /// Visible height in pixels
    pub height: u16,

    /// Bits per pixel reported to drawing layers
    pub color_depth: u8,

    /// VRAM packing format
    pub pixel_format: PixelFormat,

    /// Plane column where viewport column 0 is stored
    pub column_offset: u16,

    /// Internal addressable plane width (0 = viewport width + column offset)
    pub plane_width: u16,

    /// Internal addressable plane height (0 = viewport height)
    pub plane_height: u16,

    /// Subtracted from window-relative columns when mapping payload to the viewport
    pub column_address_adjust: u16,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            color_depth: 0,
            pixel_format: PixelFormat::PackedNibble,
            column_offset: 0,
            plane_width: 0,
            plane_height: 0,
            column_address_adjust: 0,
        }
    }
}

impl ControllerConfig {
    /// Plain configuration whose plane matches the viewport
    pub fn new(width: u16, height: u16, pixel_format: PixelFormat) -> Self {
        Self {
            width,
            height,
            pixel_format,
            ..Self::default()
        }
        .normalized()
    }

    /// SSD1322: 4-bit gray, 480-column plane, panel wired from column 28
    pub fn ssd1322(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            color_depth: 4,
            pixel_format: PixelFormat::PackedNibble,
            column_offset: SSD1322_COLUMN_OFFSET,
            plane_width: SSD1322_PLANE_COLUMNS.max(width.saturating_add(SSD1322_COLUMN_OFFSET)),
            plane_height: height,
            column_address_adjust: 0,
        }
    }

    /// SSD1306-style monochrome panel with vertical byte packing
    pub fn ssd1306(width: u16, height: u16) -> Self {
        Self::new(width, height, PixelFormat::PackedBit)
    }

    /// 24-bit color panel
    pub fn rgb(width: u16, height: u16) -> Self {
        Self::new(width, height, PixelFormat::Rgb24)
    }

    /// Fill derived fields left at zero
    pub fn normalized(mut self) -> Self {
        if self.color_depth == 0 {
            self.color_depth = self.pixel_format.bits_per_pixel();
        }
        if self.plane_width == 0 {
            self.plane_width = self.width.saturating_add(self.column_offset);
        }
        if self.plane_height == 0 {
            self.plane_height = self.height;
        }
        self
    }

    /// Check the geometry and color depth
    ///
    /// Fails with `InvalidDimensions` for a zero-sized viewport, with
    /// `PlaneTooSmall` when the viewport does not fit inside the plane and with
    /// `ColorDepthTooLarge` when `color_depth` exceeds what the format stores.
    pub fn validate(&self) -> std::result::Result<(), DisplayError> {
        if self.width == 0 || self.height == 0 {
            return Err(DisplayError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let right = u32::from(self.width) + u32::from(self.column_offset);
        if right > u32::from(self.plane_width) || self.height > self.plane_height {
            return Err(DisplayError::PlaneTooSmall {
                width: self.width,
                height: self.height,
                column_offset: self.column_offset,
                plane_width: self.plane_width,
                plane_height: self.plane_height,
            });
        }

        let max = self.pixel_format.bits_per_pixel();
        if self.color_depth > max {
            return Err(DisplayError::ColorDepthTooLarge {
                color_depth: self.color_depth,
                max,
            });
        }

        Ok(())
    }

    /// Parse a TOML document
    ///
    /// The result is normalized and passes [`ControllerConfig::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config = toml::from_str::<ControllerConfig>(text)?.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading controller config from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
