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

//! Payload transfer between the data line and VRAM
//!
//! Implements the data phase: decoding payload bytes into pixel values at the
//! addressing cursor (Write RAM) and encoding VRAM back into payload bytes
//! (Read RAM).
//!
//! Byte layouts per format:
//! - `PackedNibble`: low nibble is the pixel at the cursor, high nibble the next one
//! - `PackedBit`: bit `n` is the pixel `n` columns right of the cursor
//! - `Rgb24`: three consecutive bytes (R, G, B) form one pixel

use super::registers::Phase;
use super::Controller;
use crate::core::plane::PixelFormat;

/// Most pixels a single payload byte can carry
const MAX_PIXELS_PER_BYTE: usize = 8;

impl Controller {
    /// Write payload bytes at the addressing cursor
    ///
    /// Only effective after Write RAM (0x5C). Pixels that map outside the
    /// viewport are dropped; the cursor advances regardless.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Raw payload bytes from the data line
    ///
    /// # Example
    ///
    /// ```
    /// use oled_emu::core::controller::Controller;
    ///
    /// let mut controller = Controller::ssd1322(256, 64).unwrap();
    /// controller.process_command(0x5C, &[]);
    /// controller.write_data(&[0xF5]);
    ///
    /// assert_eq!(controller.get_pixel(0, 0).unwrap(), 0x5);
    /// assert_eq!(controller.get_pixel(1, 0).unwrap(), 0xF);
    /// ```
    pub fn write_data(&mut self, bytes: &[u8]) {
        if self.phase != Phase::DataWrite {
            log::warn!(
                "Discarding {} payload bytes outside write phase ({:?})",
                bytes.len(),
                self.phase
            );
            return;
        }

        for &byte in bytes {
            self.write_payload_byte(byte);
        }
    }

    /// Read payload bytes from the addressing cursor
    ///
    /// Only effective after Read RAM (0x5D); returns an empty vector otherwise.
    /// Uses the same byte layout and cursor movement as [`Controller::write_data`].
    /// Positions outside the viewport read as zero.
    pub fn read_data(&mut self, len: usize) -> Vec<u8> {
        if self.phase != Phase::DataRead {
            log::warn!("Read of {} payload bytes outside read phase ({:?})", len, self.phase);
            return Vec::new();
        }

        (0..len).map(|_| self.read_payload_byte()).collect()
    }

    fn write_payload_byte(&mut self, byte: u8) {
        let mut values = [0u32; MAX_PIXELS_PER_BYTE];

        let count = match self.memory.pixel_format() {
            PixelFormat::PackedNibble => {
                values[0] = u32::from(byte & 0x0F);
                values[1] = u32::from(byte >> 4);
                2
            }
            PixelFormat::PackedBit => {
                for (bit, value) in values.iter_mut().enumerate() {
                    *value = u32::from((byte >> bit) & 1);
                }
                8
            }
            PixelFormat::Rgb24 => {
                self.latch[self.latch_len] = byte;
                self.latch_len += 1;
                if self.latch_len < 3 {
                    return;
                }
                self.latch_len = 0;
                values[0] = (u32::from(self.latch[0]) << 16)
                    | (u32::from(self.latch[1]) << 8)
                    | u32::from(self.latch[2]);
                1
            }
        };

        let row = i32::from(self.window.cur_row);
        let base = self.cursor_x();

        for (i, &value) in values[..count].iter().enumerate() {
            let x = base + i as i32;
            if !self.memory.in_viewport(x, row) {
                continue;
            }
            if let Err(e) = self.memory.set_pixel(x, row, value) {
                log::trace!("Dropped payload pixel: {}", e);
            }
        }

        self.window.advance(count as u16);
    }

    fn read_payload_byte(&mut self) -> u8 {
        let row = i32::from(self.window.cur_row);
        let base = self.cursor_x();

        let (byte, count) = match self.memory.pixel_format() {
            PixelFormat::PackedNibble => {
                let lo = self.pixel_or_zero(base, row);
                let hi = self.pixel_or_zero(base + 1, row);
                ((lo | (hi << 4)) as u8, 2)
            }
            PixelFormat::PackedBit => {
                let byte = (0..8).fold(0u8, |acc, bit| {
                    acc | ((self.pixel_or_zero(base + bit, row) as u8 & 1) << bit)
                });
                (byte, 8)
            }
            PixelFormat::Rgb24 => {
                let value = self.pixel_or_zero(base, row);
                let shift = 16 - 8 * self.latch_len as u32;
                self.latch_len += 1;
                let byte = (value >> shift) as u8;
                if self.latch_len < 3 {
                    return byte;
                }
                self.latch_len = 0;
                (byte, 1)
            }
        };

        self.window.advance(count);
        byte
    }

    /// Viewport column of the cursor
    #[inline]
    fn cursor_x(&self) -> i32 {
        i32::from(self.window.cur_col)
            - i32::from(self.window.col_start)
            - i32::from(self.column_address_adjust)
    }

    #[inline]
    fn pixel_or_zero(&self, x: i32, y: i32) -> u32 {
        self.memory.get_pixel(x, y).unwrap_or(0)
    }
}
