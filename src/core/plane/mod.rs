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

//! Pixel plane addressing
//!
//! This module converts logical pixel coordinates on the controller's internal
//! addressable plane into VRAM byte offsets and sub-byte positions, and performs
//! masked reads and writes on a borrowed VRAM buffer.
//!
//! # Layouts
//!
//! - `PackedNibble`: linear index `i = y * width + x`, byte `i / 2`. Even indices
//!   use bits 0-3, odd indices bits 4-7.
//! - `PackedBit`: 8 rows per byte, pages stored column-major. Byte
//!   `x * ceil(height / 8) + y / 8`, bit `y % 8`.
//! - `Rgb24`: byte `(y * width + x) * 3`, stored R, G, B.
//!
//! # Coordinate System
//!
//! The origin is the top-left corner of the plane. Coordinates are signed so that
//! callers can pass unclipped values; anything outside `[0, width) × [0, height)`
//! is rejected with [`DisplayError::OutOfBounds`]. Nothing is clamped or wrapped.
//!
//! Writes never touch bits that belong to another pixel:
//!
//! ```text
//! new = (old & !mask) | ((value & field_mask) << shift)
//! ```

mod format;

pub use format::PixelFormat;

use crate::core::error::DisplayError;

/// Storage position of a single pixel
///
/// For `Rgb24` the pixel occupies three whole bytes starting at `byte_offset`
/// and `shift`/`mask` describe the first of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Offset of the (first) byte holding the pixel
    pub byte_offset: usize,
    /// Index of the pixel within its byte (0 for whole-byte formats)
    pub sub_index: u8,
    /// Bit position of the pixel's field
    pub shift: u8,
    /// Mask covering the pixel's field inside the byte
    pub mask: u8,
}

/// Pure addressing and storage logic for one VRAM plane
///
/// The plane does not own memory; every accessor borrows the buffer it operates
/// on. Buffers shorter than [`PixelPlane::vram_len`] are handled gracefully:
/// accesses past the end fail with `OutOfBounds` instead of panicking.
///
/// # Examples
///
/// ```
/// use oled_emu::core::plane::{PixelFormat, PixelPlane};
///
/// let plane = PixelPlane::new(PixelFormat::PackedNibble, 480, 64);
/// let mut vram = vec![0u8; plane.vram_len()];
///
/// plane.write_pixel(&mut vram, 0, 0, 0x5).unwrap();
/// plane.write_pixel(&mut vram, 1, 0, 0xF).unwrap();
/// assert_eq!(vram[0], 0xF5);
/// assert_eq!(plane.read_pixel(&vram, 1, 0).unwrap(), 0xF);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPlane {
    format: PixelFormat,
    width: u16,
    height: u16,
}

impl PixelPlane {
    /// Create a plane description
    ///
    /// # Arguments
    ///
    /// * `format` - Pixel packing format
    /// * `width` - Plane width in pixels
    /// * `height` - Plane height in pixels
    pub fn new(format: PixelFormat, width: u16, height: u16) -> Self {
        Self {
            format,
            width,
            height,
        }
    }

    /// Packing format of this plane
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Plane width in pixels
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Plane height in pixels
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Size of the VRAM buffer backing this plane, in bytes
    pub fn vram_len(&self) -> usize {
        self.format.vram_len(self.width, self.height)
    }

    /// Whether `(x, y)` lies on the plane
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height)
    }

    /// Convert plane coordinates to a storage location
    ///
    /// # Arguments
    ///
    /// * `x` - Plane column
    /// * `y` - Plane row
    ///
    /// # Returns
    ///
    /// The byte offset and sub-byte position of the pixel, or `OutOfBounds` if the
    /// coordinate is outside the plane.
    pub fn locate(&self, x: i32, y: i32) -> Result<Location, DisplayError> {
        if !self.contains(x, y) {
            return Err(DisplayError::OutOfBounds { x, y });
        }

        let (x, y) = (x as usize, y as usize);
        let width = self.width as usize;

        let location = match self.format {
            PixelFormat::PackedNibble => {
                let index = y * width + x;
                let sub_index = (index % 2) as u8;
                let shift = sub_index * 4;
                Location {
                    byte_offset: index / 2,
                    sub_index,
                    shift,
                    mask: 0x0F << shift,
                }
            }
            PixelFormat::PackedBit => {
                let pages = (self.height as usize).div_ceil(8);
                let sub_index = (y % 8) as u8;
                Location {
                    byte_offset: x * pages + y / 8,
                    sub_index,
                    shift: sub_index,
                    mask: 1 << sub_index,
                }
            }
            PixelFormat::Rgb24 => Location {
                byte_offset: (y * width + x) * 3,
                sub_index: 0,
                shift: 0,
                mask: 0xFF,
            },
        };

        Ok(location)
    }

    /// Read one pixel value
    ///
    /// Sub-byte formats return only the bits of the addressed pixel. `Rgb24`
    /// returns `0xRRGGBB`.
    pub fn read_pixel(&self, buf: &[u8], x: i32, y: i32) -> Result<u32, DisplayError> {
        let loc = self.locate(x, y)?;

        if !self.format.is_sub_byte() {
            let rgb = buf
                .get(loc.byte_offset..loc.byte_offset + 3)
                .ok_or(DisplayError::OutOfBounds { x, y })?;
            return Ok((u32::from(rgb[0]) << 16) | (u32::from(rgb[1]) << 8) | u32::from(rgb[2]));
        }

        let byte = *buf
            .get(loc.byte_offset)
            .ok_or(DisplayError::OutOfBounds { x, y })?;
        Ok(u32::from((byte & loc.mask) >> loc.shift))
    }

    /// Write one pixel value
    ///
    /// The value is truncated to the format's bit width. For sub-byte formats the
    /// other pixels sharing the byte are preserved.
    pub fn write_pixel(
        &self,
        buf: &mut [u8],
        x: i32,
        y: i32,
        value: u32,
    ) -> Result<(), DisplayError> {
        let loc = self.locate(x, y)?;
        let value = value & self.format.value_mask();

        if !self.format.is_sub_byte() {
            let rgb = buf
                .get_mut(loc.byte_offset..loc.byte_offset + 3)
                .ok_or(DisplayError::OutOfBounds { x, y })?;
            rgb[0] = (value >> 16) as u8;
            rgb[1] = (value >> 8) as u8;
            rgb[2] = value as u8;
            return Ok(());
        }

        let byte = buf
            .get_mut(loc.byte_offset)
            .ok_or(DisplayError::OutOfBounds { x, y })?;
        *byte = (*byte & !loc.mask) | (((value as u8) << loc.shift) & loc.mask);
        Ok(())
    }

    /// Fill an inclusive rectangle with one value
    ///
    /// Does nothing when `x0 > x1` or `y0 > y1`. Both corners are validated
    /// before anything is written, so a failing call leaves the buffer untouched.
    pub fn fill_region(
        &self,
        buf: &mut [u8],
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        value: u32,
    ) -> Result<(), DisplayError> {
        if x0 > x1 || y0 > y1 {
            return Ok(());
        }

        self.check_region(buf, x0, y0, x1, y1)?;

        for y in y0..=y1 {
            for x in x0..=x1 {
                self.write_pixel(buf, x, y, value)?;
            }
        }

        Ok(())
    }

    /// Copy the values of an inclusive rectangle, row-major
    ///
    /// Returns an empty vector when `x0 > x1` or `y0 > y1`.
    pub fn extract_region(
        &self,
        buf: &[u8],
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> Result<Vec<u32>, DisplayError> {
        if x0 > x1 || y0 > y1 {
            return Ok(Vec::new());
        }

        self.check_region(buf, x0, y0, x1, y1)?;

        let width = (x1 - x0 + 1) as usize;
        let height = (y1 - y0 + 1) as usize;
        let mut values = Vec::with_capacity(width * height);

        for y in y0..=y1 {
            for x in x0..=x1 {
                values.push(self.read_pixel(buf, x, y)?);
            }
        }

        Ok(values)
    }

    fn check_region(
        &self,
        buf: &[u8],
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> Result<(), DisplayError> {
        self.locate(x0, y0)?;
        self.locate(x1, y1)?;

        if buf.len() < self.vram_len() {
            return Err(DisplayError::OutOfBounds { x: x1, y: y1 });
        }

        Ok(())
    }
}
