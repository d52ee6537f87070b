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

//! Controller register and state definitions
//!
//! This module contains the state record mutated by opcode handlers: the
//! configuration scalars, the addressing window and the three state axes
//! (lock, phase, power).

use bitflags::bitflags;
use serde::Serialize;

/// Command lock state
///
/// Tracked for inspection only; no opcode is rejected while locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LockState {
    #[default]
    Locked,
    Unlocked,
}

/// Interface phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    /// Bytes are interpreted as commands
    #[default]
    Command,
    /// Payload bytes are written to VRAM (after Write RAM)
    DataWrite,
    /// Payload bytes are read from VRAM (after Read RAM)
    DataRead,
}

/// Panel power state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PowerState {
    #[default]
    Asleep,
    Active,
}

/// Display mode selected by 0xA4/0xA5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DisplayMode {
    /// Panel shows GDDRAM contents
    #[default]
    Normal,
    /// All pixels forced to full brightness
    EntireOn,
}

bitflags! {
    /// Bits of the remap / dual COM register (0xA0)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RemapFlags: u8 {
        /// Vertical address increment
        const VERTICAL_INCREMENT = 1 << 0;
        /// Column address remap
        const COLUMN_REMAP = 1 << 1;
        /// Nibble remap
        const NIBBLE_REMAP = 1 << 2;
        /// Scan from COM[N-1] to COM0
        const COM_SCAN_REVERSE = 1 << 4;
        /// Odd/even COM split
        const COM_SPLIT = 1 << 5;
    }
}

/// Parameters of the last horizontal scroll setup (0x26/0x27)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollSetup {
    /// Set by 0x27
    pub continuous: bool,
    /// Raw parameter bytes
    pub params: [u8; 5],
}

/// Configuration scalars
///
/// A single record owned by the controller. Every field changes only through an
/// opcode handler or a reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registers {
    /// Segment output current (0xC1)
    pub contrast: u8,
    /// Master current attenuation, 4 bits (0xC7)
    pub master_current: u8,
    /// Inverse display (0xA6/0xA7)
    pub invert: bool,
    /// Multiplex ratio (0xCA)
    pub mux_ratio: u8,
    /// Front clock divider / oscillator frequency (0xB3)
    pub clock_divider: u8,
    /// Phase 1/2 period (0xB1)
    pub phase_length: u8,
    /// Second precharge period (0xBB)
    pub precharge: u8,
    /// COM deselect voltage (0xBE)
    pub vcomh: u8,
    /// Remap / dual COM byte (0xA0)
    pub remap: u8,
    /// Display start line, 7 bits (0xA1)
    pub start_line: u8,
    /// Vertical display offset (0xA2)
    pub display_offset: u8,
    /// Grayscale table selection (0xB9)
    pub grayscale_table: u8,
    /// Horizontal scroll running (0x2E/0x2F)
    pub scroll_enabled: bool,
    /// Normal / entire-on (0xA4/0xA5)
    pub display_mode: DisplayMode,
    /// Display enhancement A (0xB4)
    pub enhance_a: u8,
    /// Display enhancement B (0xD1)
    pub enhance_b: u8,
    /// Last horizontal scroll setup (0x26/0x27)
    pub scroll_setup: Option<ScrollSetup>,
}

impl Default for Registers {
    /// Power-on values
    fn default() -> Self {
        Self {
            contrast: 0x7F,
            master_current: 0x0F,
            invert: false,
            mux_ratio: 0x3F,
            clock_divider: 0x00,
            phase_length: 0x74,
            precharge: 0x3C,
            vcomh: 0x07,
            remap: 0x14,
            start_line: 0,
            display_offset: 0,
            grayscale_table: 0,
            scroll_enabled: false,
            display_mode: DisplayMode::Normal,
            enhance_a: 0x00,
            enhance_b: 0x00,
            scroll_setup: None,
        }
    }
}

impl Registers {
    /// Decoded remap byte; unknown bits are kept
    pub fn remap_flags(&self) -> RemapFlags {
        RemapFlags::from_bits_retain(self.remap)
    }
}

/// Addressing window and write cursor
///
/// Column and row bounds are inclusive. The cursor advances left to right,
/// wrapping to `col_start` on the next row, and back to `row_start` after
/// `row_end`.
///
/// # Examples
///
/// ```
/// use oled_emu::core::controller::AddressWindow;
///
/// let mut window = AddressWindow::full(256, 64);
/// window.set_columns(254, 255);
/// window.set_rows(0, 0);
///
/// window.advance(2);
/// assert_eq!((window.cur_col, window.cur_row), (254, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressWindow {
    pub col_start: u16,
    pub col_end: u16,
    pub row_start: u16,
    pub row_end: u16,
    pub cur_col: u16,
    pub cur_row: u16,
}

impl AddressWindow {
    /// Window covering a whole viewport, cursor at the origin
    pub fn full(width: u16, height: u16) -> Self {
        Self {
            col_start: 0,
            col_end: width.saturating_sub(1),
            row_start: 0,
            row_end: height.saturating_sub(1),
            cur_col: 0,
            cur_row: 0,
        }
    }

    /// Set column bounds and move the cursor to the first column
    pub fn set_columns(&mut self, start: u16, end: u16) {
        self.col_start = start;
        self.col_end = end;
        self.cur_col = start;
    }

    /// Set row bounds and move the cursor to the first row
    pub fn set_rows(&mut self, start: u16, end: u16) {
        self.row_start = start;
        self.row_end = end;
        self.cur_row = start;
    }

    /// Advance the cursor by `columns`, wrapping at the window edges
    pub fn advance(&mut self, columns: u16) {
        self.cur_col = self.cur_col.saturating_add(columns);

        if self.cur_col > self.col_end {
            self.cur_col = self.col_start;
            self.cur_row = self.cur_row.saturating_add(1);

            if self.cur_row > self.row_end {
                self.cur_row = self.row_start;
            }
        }
    }
}
