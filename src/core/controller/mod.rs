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

//! Display controller state machine
//!
//! This module emulates the command interface of a segmented grayscale OLED
//! controller (SSD1322 family). The controller consumes framed
//! `(opcode, arguments)` pairs and raw payload bytes, maintains an addressing
//! window with a write cursor, and stores pixels in its [`DisplayMemory`].
//!
//! # State
//!
//! The controller state is the product of three independent axes:
//!
//! | Axis  | Values                           | Initial    |
//! |-------|----------------------------------|------------|
//! | Lock  | `Locked`, `Unlocked`             | `Locked`   |
//! | Phase | `Command`, `DataWrite`, `DataRead` | `Command` |
//! | Power | `Asleep`, `Active`               | `Asleep`   |
//!
//! The lock is tracked but never enforced: every opcode is honoured while
//! locked, matching the emulated hardware model.
//!
//! # Failure model
//!
//! Command and payload processing never fail. Unknown opcodes and short argument
//! lists are ignored, arguments are masked to their register width, and payload
//! pixels outside the viewport are dropped. Only direct pixel access through
//! [`Controller::set_pixel`]/[`Controller::get_pixel`] reports errors.
//!
//! # References
//!
//! - SSD1322 datasheet, section 9 (Command Table)

mod commands;
mod payload;
mod registers;
#[cfg(test)]
mod tests;

pub use commands::{Command, LOCK_MAGIC, UNLOCK_MAGIC};
pub use registers::{
    AddressWindow, DisplayMode, LockState, Phase, PowerState, Registers, RemapFlags, ScrollSetup,
};

use serde::Serialize;

use crate::core::config::ControllerConfig;
use crate::core::error::DisplayError;
use crate::core::memory::{Display, DisplayMemory, Rect};
use crate::core::plane::PixelFormat;

/// Emulated display controller
///
/// Owns its VRAM; every operation runs to completion on the caller's thread.
///
/// # Examples
///
/// ```
/// use oled_emu::core::controller::{Controller, LockState, PowerState};
///
/// let mut controller = Controller::ssd1322(256, 64).unwrap();
/// assert_eq!(controller.lock_state(), LockState::Locked);
///
/// controller.process_command(0xFD, &[0xB1]); // unlock
/// controller.process_command(0xAF, &[]); // display on
/// controller.process_command(0xC1, &[0x9F]); // contrast
///
/// assert_eq!(controller.lock_state(), LockState::Unlocked);
/// assert_eq!(controller.power_state(), PowerState::Active);
/// assert_eq!(controller.registers().contrast, 0x9F);
/// ```
#[derive(Debug, Clone)]
pub struct Controller {
    /// VRAM and dirty region
    pub(in crate::core::controller) memory: DisplayMemory,

    /// Configuration scalars
    pub(in crate::core::controller) registers: Registers,

    /// Addressing window and cursor
    pub(in crate::core::controller) window: AddressWindow,

    pub(in crate::core::controller) lock: LockState,
    pub(in crate::core::controller) phase: Phase,
    pub(in crate::core::controller) power: PowerState,

    /// Subtracted from window-relative columns when mapping payload
    pub(in crate::core::controller) column_address_adjust: u16,

    /// Partial `Rgb24` pixel (write) or channel index (read)
    pub(in crate::core::controller) latch: [u8; 3],
    pub(in crate::core::controller) latch_len: usize,
}

/// Serializable snapshot of the controller state (everything except VRAM)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerStatus {
    pub width: u16,
    pub height: u16,
    pub color_depth: u8,
    pub pixel_format: PixelFormat,
    pub lock: LockState,
    pub phase: Phase,
    pub power: PowerState,
    pub window: AddressWindow,
    pub registers: Registers,
    pub dirty: Option<Rect>,
}

impl Controller {
    /// Create a controller in its power-on state
    ///
    /// # Errors
    ///
    /// Fails if the configuration's geometry is invalid (zero-sized viewport or
    /// a viewport that does not fit the plane).
    pub fn new(config: &ControllerConfig) -> Result<Self, DisplayError> {
        let memory = DisplayMemory::new(config)?;
        let window = AddressWindow::full(memory.width(), memory.height());

        Ok(Self {
            memory,
            registers: Registers::default(),
            window,
            lock: LockState::Locked,
            phase: Phase::Command,
            power: PowerState::Asleep,
            column_address_adjust: config.column_address_adjust,
            latch: [0; 3],
            latch_len: 0,
        })
    }

    /// SSD1322 with the given viewport (4-bit gray, 480-column plane)
    pub fn ssd1322(width: u16, height: u16) -> Result<Self, DisplayError> {
        Self::new(&ControllerConfig::ssd1322(width, height))
    }

    /// Process one framed command
    ///
    /// Unknown opcodes and argument lists shorter than the command requires are
    /// ignored without touching any state. Extra argument bytes are ignored.
    ///
    /// # Arguments
    ///
    /// * `opcode` - Command byte
    /// * `args` - Argument bytes that followed the command
    pub fn process_command(&mut self, opcode: u8, args: &[u8]) {
        let Some(command) = Command::decode(opcode) else {
            log::trace!("Ignoring unknown opcode 0x{:02X} ({} args)", opcode, args.len());
            return;
        };

        let needed = command.arg_count();
        if args.len() < needed {
            log::trace!(
                "Ignoring {} (0x{:02X}): {} of {} argument bytes",
                command.name(),
                opcode,
                args.len(),
                needed
            );
            return;
        }

        log::trace!("{} (0x{:02X}) {:02X?}", command.name(), opcode, &args[..needed]);
        self.execute(command, &args[..needed]);
    }

    /// Hardware reset
    ///
    /// Restores power-on defaults: locked, asleep, command phase, full-viewport
    /// window, default registers, zeroed VRAM with the whole viewport dirty.
    pub fn reset(&mut self) {
        self.memory.reset();
        self.registers = Registers::default();
        self.window = AddressWindow::full(self.memory.width(), self.memory.height());
        self.lock = LockState::Locked;
        self.phase = Phase::Command;
        self.power = PowerState::Asleep;
        self.latch_len = 0;

        log::debug!("Controller reset");
    }

    /// Switch phase, dropping any partial `Rgb24` pixel
    pub(in crate::core::controller) fn enter_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
        self.latch_len = 0;
    }

    /// Write one pixel directly, bypassing the addressing window
    pub fn set_pixel(&mut self, x: i32, y: i32, value: u32) -> Result<(), DisplayError> {
        self.memory.set_pixel(x, y, value)
    }

    /// Read one pixel
    pub fn get_pixel(&self, x: i32, y: i32) -> Result<u32, DisplayError> {
        self.memory.get_pixel(x, y)
    }

    #[inline]
    pub fn dirty_region(&self) -> Option<Rect> {
        self.memory.dirty_region()
    }

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.memory.clear_dirty()
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.memory.width()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.memory.height()
    }

    #[inline]
    pub fn color_depth(&self) -> u8 {
        self.memory.color_depth()
    }

    #[inline]
    pub fn pixel_format(&self) -> PixelFormat {
        self.memory.pixel_format()
    }

    /// VRAM contents
    #[inline]
    pub fn frame_buffer(&self) -> &[u8] {
        self.memory.vram()
    }

    #[inline]
    pub fn memory(&self) -> &DisplayMemory {
        &self.memory
    }

    #[inline]
    pub fn memory_mut(&mut self) -> &mut DisplayMemory {
        &mut self.memory
    }

    #[inline]
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    #[inline]
    pub fn window(&self) -> &AddressWindow {
        &self.window
    }

    #[inline]
    pub fn lock_state(&self) -> LockState {
        self.lock
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn power_state(&self) -> PowerState {
        self.power
    }

    #[inline]
    pub fn is_display_on(&self) -> bool {
        self.power == PowerState::Active
    }

    /// Snapshot of everything but VRAM
    pub fn status(&self) -> ControllerStatus {
        ControllerStatus {
            width: self.width(),
            height: self.height(),
            color_depth: self.color_depth(),
            pixel_format: self.pixel_format(),
            lock: self.lock,
            phase: self.phase,
            power: self.power,
            window: self.window,
            registers: self.registers.clone(),
            dirty: self.dirty_region(),
        }
    }
}

impl Display for Controller {
    fn width(&self) -> u16 {
        Self::width(self)
    }

    fn height(&self) -> u16 {
        Self::height(self)
    }

    fn color_depth(&self) -> u8 {
        Self::color_depth(self)
    }

    fn pixel_format(&self) -> PixelFormat {
        Self::pixel_format(self)
    }

    fn set_pixel(&mut self, x: i32, y: i32, value: u32) -> Result<(), DisplayError> {
        Self::set_pixel(self, x, y, value)
    }

    fn get_pixel(&self, x: i32, y: i32) -> Result<u32, DisplayError> {
        Self::get_pixel(self, x, y)
    }

    fn dirty_region(&self) -> Option<Rect> {
        Self::dirty_region(self)
    }

    fn clear_dirty(&mut self) {
        Self::clear_dirty(self)
    }
}
