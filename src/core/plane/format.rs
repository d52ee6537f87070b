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

//! Pixel packing formats
//!
//! Describes how pixel values are packed into VRAM bytes.

use serde::{Deserialize, Serialize};

/// How pixels are packed in VRAM
///
/// # Examples
///
/// ```
/// use oled_emu::core::plane::PixelFormat;
///
/// assert_eq!(PixelFormat::PackedNibble.bits_per_pixel(), 4);
/// assert_eq!(PixelFormat::PackedNibble.vram_len(480, 64), 15360);
/// assert_eq!(PixelFormat::PackedBit.vram_len(128, 64), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// 2 pixels per byte, 4-bit gray each, packed horizontally (SSD1322 native)
    ///
    /// The even pixel of a pair lives in the low nibble.
    #[default]
    PackedNibble,

    /// 8 pixels per byte, 1-bit each, packed vertically in 8-row pages (SSD1306 style)
    PackedBit,

    /// 3 bytes per pixel, stored R, G, B
    Rgb24,
}

impl PixelFormat {
    /// Number of significant bits in a pixel value
    #[inline]
    pub const fn bits_per_pixel(self) -> u8 {
        match self {
            PixelFormat::PackedNibble => 4,
            PixelFormat::PackedBit => 1,
            PixelFormat::Rgb24 => 24,
        }
    }

    /// Mask applied to pixel values before they are stored
    #[inline]
    pub const fn value_mask(self) -> u32 {
        match self {
            PixelFormat::PackedNibble => 0x0F,
            PixelFormat::PackedBit => 0x01,
            PixelFormat::Rgb24 => 0x00FF_FFFF,
        }
    }

    /// Whether several pixels share one storage byte
    #[inline]
    pub const fn is_sub_byte(self) -> bool {
        !matches!(self, PixelFormat::Rgb24)
    }

    /// VRAM size in bytes for a plane of the given dimensions
    pub fn vram_len(self, plane_width: u16, plane_height: u16) -> usize {
        let width = plane_width as usize;
        let height = plane_height as usize;

        match self {
            PixelFormat::PackedNibble => (width * height).div_ceil(2),
            PixelFormat::PackedBit => width * height.div_ceil(8),
            PixelFormat::Rgb24 => width * height * 3,
        }
    }
}
