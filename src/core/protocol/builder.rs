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

//! Framed command sequences
//!
//! A [`Frame`] is one unit of host traffic: a command with its argument bytes,
//! a run of payload bytes, or a hardware reset. [`CommandBuilder`] collects
//! frames fluently; the free functions build the sequences a driver sends most
//! often.

use serde::{Deserialize, Serialize};

use crate::core::controller::{Controller, LOCK_MAGIC, UNLOCK_MAGIC};

/// One unit of host-to-controller traffic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Frame {
    /// Command byte with its arguments (DC low)
    Command {
        opcode: u8,
        #[serde(default)]
        args: Vec<u8>,
    },
    /// Payload bytes (DC high)
    Data { bytes: Vec<u8> },
    /// Hardware reset line pulse
    Reset,
}

impl Frame {
    pub fn command(opcode: u8, args: &[u8]) -> Self {
        Frame::Command {
            opcode,
            args: args.to_vec(),
        }
    }

    pub fn data(bytes: &[u8]) -> Self {
        Frame::Data {
            bytes: bytes.to_vec(),
        }
    }

    /// Deliver the frame straight to a controller
    pub fn apply(&self, controller: &mut Controller) {
        match self {
            Frame::Command { opcode, args } => controller.process_command(*opcode, args),
            Frame::Data { bytes } => controller.write_data(bytes),
            Frame::Reset => controller.reset(),
        }
    }

    /// Number of bytes this frame puts on the bus
    pub fn wire_len(&self) -> usize {
        match self {
            Frame::Command { args, .. } => 1 + args.len(),
            Frame::Data { bytes } => bytes.len(),
            Frame::Reset => 0,
        }
    }
}

/// Fluent frame list builder
///
/// # Examples
///
/// ```
/// use oled_emu::core::protocol::{CommandBuilder, Frame};
///
/// let frames = CommandBuilder::new()
///     .command(0xC1, &[0x9F])
///     .command(0x5C, &[])
///     .data(&[0xF5])
///     .build();
///
/// assert_eq!(frames.len(), 3);
/// assert_eq!(frames[2], Frame::data(&[0xF5]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    frames: Vec<Frame>,
}

impl CommandBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command(mut self, opcode: u8, args: &[u8]) -> Self {
        self.frames.push(Frame::command(opcode, args));
        self
    }

    /// Append payload bytes, merging with a preceding data frame
    pub fn data(mut self, bytes: &[u8]) -> Self {
        match self.frames.last_mut() {
            Some(Frame::Data { bytes: pending }) => pending.extend_from_slice(bytes),
            _ => self.frames.push(Frame::data(bytes)),
        }
        self
    }

    pub fn reset(mut self) -> Self {
        self.frames.push(Frame::Reset);
        self
    }

    pub fn unlock(self) -> Self {
        self.command(0xFD, &[UNLOCK_MAGIC])
    }

    pub fn lock(self) -> Self {
        self.command(0xFD, &[LOCK_MAGIC])
    }

    /// Column and row window covering `width` × `height` from the origin
    pub fn window(self, width: u16, height: u16) -> Self {
        self.command(0x15, &[0, last_address(width)])
            .command(0x75, &[0, last_address(height)])
    }

    pub fn extend(mut self, frames: impl IntoIterator<Item = Frame>) -> Self {
        self.frames.extend(frames);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn build(self) -> Vec<Frame> {
        self.frames
    }
}

/// Highest one-byte address inside `extent`
#[inline]
fn last_address(extent: u16) -> u8 {
    u8::try_from(extent.saturating_sub(1)).unwrap_or(u8::MAX)
}

/// Both nibbles set to a 4-bit gray level
#[inline]
fn gray_pair(level: u8) -> u8 {
    let level = level & 0x0F;
    (level << 4) | level
}

/// Power-on initialization for a `width` × `height` SSD1322 panel
///
/// Unlocks the interface, programs timing and drive registers, opens a window
/// over the whole viewport and turns the display on.
pub fn init_sequence(width: u16, height: u16) -> Vec<Frame> {
    CommandBuilder::new()
        .unlock()
        .command(0xAE, &[])
        .command(0xB3, &[0x91])
        .command(0xCA, &[last_address(height)])
        .command(0xA2, &[0x00])
        .command(0xA1, &[0x00])
        .command(0xA0, &[0x14])
        .command(0xB1, &[0xE2])
        .command(0xB4, &[0xA0])
        .command(0xC1, &[0x7F])
        .command(0xC7, &[0x0F])
        .command(0xBB, &[0x08])
        .command(0xBE, &[0x07])
        .command(0xA6, &[0x00])
        .window(width, height)
        .command(0xAF, &[])
        .build()
}

/// Address a one-pixel window at `(x, y)` and write `level` into it
///
/// The payload byte carries `level` in both nibbles and decodes to two pixels.
/// The controller places window payload relative to the window start, so with
/// the default column address adjustment viewport columns 0 and 1 of row `y`
/// are both written.
pub fn draw_pixel(x: u8, y: u8, level: u8) -> Vec<Frame> {
    CommandBuilder::new()
        .command(0x15, &[x, x])
        .command(0x75, &[y, y])
        .command(0x5C, &[])
        .data(&[gray_pair(level)])
        .build()
}

/// Fill the whole `width` × `height` viewport with one gray level
pub fn fill_screen(width: u16, height: u16, level: u8) -> Vec<Frame> {
    let len = (usize::from(width) * usize::from(height)).div_ceil(2);
    CommandBuilder::new()
        .window(width, height)
        .command(0x5C, &[])
        .data(&vec![gray_pair(level); len])
        .build()
}

pub fn contrast(level: u8) -> Vec<Frame> {
    vec![Frame::command(0xC1, &[level])]
}

pub fn inversion(inverted: bool) -> Vec<Frame> {
    if inverted {
        vec![Frame::command(0xA7, &[])]
    } else {
        vec![Frame::command(0xA6, &[0x00])]
    }
}

pub fn power(on: bool) -> Vec<Frame> {
    vec![Frame::command(if on { 0xAF } else { 0xAE }, &[])]
}
