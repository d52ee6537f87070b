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

//! Controller command set
//!
//! Every opcode the controller understands maps to one [`Command`] variant. The
//! mapping is a closed table: [`Command::decode`] is the only way from a raw
//! opcode to a handler, and [`Command::ALL`] enumerates the whole set.

use super::registers::{DisplayMode, LockState, Phase, PowerState, ScrollSetup};
use super::Controller;

/// Argument value of 0xFD that unlocks the command interface
pub const UNLOCK_MAGIC: u8 = 0xB1;

/// Argument value of 0xFD that locks the command interface
pub const LOCK_MAGIC: u8 = 0xB0;

/// Recognized controller commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    SetColumnAddress,
    SetRowAddress,
    WriteRam,
    ReadRam,
    SetContrast,
    MasterCurrent,
    SetRemap,
    SetStartLine,
    SetDisplayOffset,
    DisplayModeNormal,
    DisplayModeEntireOn,
    SetInvert,
    InverseDisplay,
    Sleep,
    Wake,
    SetMuxRatio,
    SetClockDivider,
    SetPhaseLength,
    DisplayEnhanceA,
    DisplayEnhanceB,
    SetPrecharge,
    SetVcomh,
    GrayscaleTable,
    HorizontalScroll,
    ContinuousScroll,
    DeactivateScroll,
    ActivateScroll,
    CommandLock,
}

impl Command {
    /// Every command, in opcode table order
    pub const ALL: [Command; 28] = [
        Command::SetColumnAddress,
        Command::SetRowAddress,
        Command::WriteRam,
        Command::ReadRam,
        Command::SetContrast,
        Command::MasterCurrent,
        Command::SetRemap,
        Command::SetStartLine,
        Command::SetDisplayOffset,
        Command::DisplayModeNormal,
        Command::DisplayModeEntireOn,
        Command::SetInvert,
        Command::InverseDisplay,
        Command::Sleep,
        Command::Wake,
        Command::SetMuxRatio,
        Command::SetClockDivider,
        Command::SetPhaseLength,
        Command::DisplayEnhanceA,
        Command::DisplayEnhanceB,
        Command::SetPrecharge,
        Command::SetVcomh,
        Command::GrayscaleTable,
        Command::HorizontalScroll,
        Command::ContinuousScroll,
        Command::DeactivateScroll,
        Command::ActivateScroll,
        Command::CommandLock,
    ];

    /// Look up the command for an opcode
    ///
    /// Returns `None` for opcodes the controller ignores.
    ///
    /// # Examples
    ///
    /// ```
    /// use oled_emu::core::controller::Command;
    ///
    /// assert_eq!(Command::decode(0x15), Some(Command::SetColumnAddress));
    /// assert_eq!(Command::decode(0x00), None);
    /// ```
    pub fn decode(opcode: u8) -> Option<Command> {
        let command = match opcode {
            0x15 => Command::SetColumnAddress,
            0x75 => Command::SetRowAddress,
            0x5C => Command::WriteRam,
            0x5D => Command::ReadRam,
            0xC1 => Command::SetContrast,
            0xC7 => Command::MasterCurrent,
            0xA0 => Command::SetRemap,
            0xA1 => Command::SetStartLine,
            0xA2 => Command::SetDisplayOffset,
            0xA4 => Command::DisplayModeNormal,
            0xA5 => Command::DisplayModeEntireOn,
            0xA6 => Command::SetInvert,
            0xA7 => Command::InverseDisplay,
            0xAE => Command::Sleep,
            0xAF => Command::Wake,
            0xCA => Command::SetMuxRatio,
            0xB3 => Command::SetClockDivider,
            0xB1 => Command::SetPhaseLength,
            0xB4 => Command::DisplayEnhanceA,
            0xD1 => Command::DisplayEnhanceB,
            0xBB => Command::SetPrecharge,
            0xBE => Command::SetVcomh,
            0xB9 => Command::GrayscaleTable,
            0x26 => Command::HorizontalScroll,
            0x27 => Command::ContinuousScroll,
            0x2E => Command::DeactivateScroll,
            0x2F => Command::ActivateScroll,
            0xFD => Command::CommandLock,
            _ => return None,
        };
        Some(command)
    }

    /// Opcode byte of this command
    pub const fn opcode(self) -> u8 {
        match self {
            Command::SetColumnAddress => 0x15,
            Command::SetRowAddress => 0x75,
            Command::WriteRam => 0x5C,
            Command::ReadRam => 0x5D,
            Command::SetContrast => 0xC1,
            Command::MasterCurrent => 0xC7,
            Command::SetRemap => 0xA0,
            Command::SetStartLine => 0xA1,
            Command::SetDisplayOffset => 0xA2,
            Command::DisplayModeNormal => 0xA4,
            Command::DisplayModeEntireOn => 0xA5,
            Command::SetInvert => 0xA6,
            Command::InverseDisplay => 0xA7,
            Command::Sleep => 0xAE,
            Command::Wake => 0xAF,
            Command::SetMuxRatio => 0xCA,
            Command::SetClockDivider => 0xB3,
            Command::SetPhaseLength => 0xB1,
            Command::DisplayEnhanceA => 0xB4,
            Command::DisplayEnhanceB => 0xD1,
            Command::SetPrecharge => 0xBB,
            Command::SetVcomh => 0xBE,
            Command::GrayscaleTable => 0xB9,
            Command::HorizontalScroll => 0x26,
            Command::ContinuousScroll => 0x27,
            Command::DeactivateScroll => 0x2E,
            Command::ActivateScroll => 0x2F,
            Command::CommandLock => 0xFD,
        }
    }

    /// Number of argument bytes the command consumes
    pub const fn arg_count(self) -> usize {
        match self {
            Command::SetColumnAddress | Command::SetRowAddress => 2,
            Command::HorizontalScroll | Command::ContinuousScroll => 5,
            Command::WriteRam
            | Command::ReadRam
            | Command::DisplayModeNormal
            | Command::DisplayModeEntireOn
            | Command::InverseDisplay
            | Command::Sleep
            | Command::Wake
            | Command::DeactivateScroll
            | Command::ActivateScroll => 0,
            Command::SetContrast
            | Command::MasterCurrent
            | Command::SetRemap
            | Command::SetStartLine
            | Command::SetDisplayOffset
            | Command::SetInvert
            | Command::SetMuxRatio
            | Command::SetClockDivider
            | Command::SetPhaseLength
            | Command::DisplayEnhanceA
            | Command::DisplayEnhanceB
            | Command::SetPrecharge
            | Command::SetVcomh
            | Command::GrayscaleTable
            | Command::CommandLock => 1,
        }
    }

    /// Datasheet-style command name
    pub const fn name(self) -> &'static str {
        match self {
            Command::SetColumnAddress => "SetColumnAddress",
            Command::SetRowAddress => "SetRowAddress",
            Command::WriteRam => "WriteRAM",
            Command::ReadRam => "ReadRAM",
            Command::SetContrast => "SetContrast",
            Command::MasterCurrent => "MasterCurrentControl",
            Command::SetRemap => "SetRemap",
            Command::SetStartLine => "SetStartLine",
            Command::SetDisplayOffset => "DisplayOffset",
            Command::DisplayModeNormal => "DisplayMode",
            Command::DisplayModeEntireOn => "EntireDisplayON",
            Command::SetInvert => "NormalDisplay",
            Command::InverseDisplay => "InverseDisplay",
            Command::Sleep => "SleepMode",
            Command::Wake => "NormalMode",
            Command::SetMuxRatio => "SetMultiplexRatio",
            Command::SetClockDivider => "SetClockDivider",
            Command::SetPhaseLength => "SetPhaseLength",
            Command::DisplayEnhanceA => "DisplayEnhance",
            Command::DisplayEnhanceB => "DisplayEnhanceB",
            Command::SetPrecharge => "SetPrecharge",
            Command::SetVcomh => "SetVCOMH",
            Command::GrayscaleTable => "GrayscaleTable",
            Command::HorizontalScroll => "HorizontalScroll",
            Command::ContinuousScroll => "ContinuousScroll",
            Command::DeactivateScroll => "DeactivateScroll",
            Command::ActivateScroll => "ActivateScroll",
            Command::CommandLock => "CommandLock",
        }
    }

    /// One-line description
    pub const fn description(self) -> &'static str {
        match self {
            Command::SetColumnAddress => "Set column address",
            Command::SetRowAddress => "Set row address",
            Command::WriteRam => "Write RAM",
            Command::ReadRam => "Read RAM",
            Command::SetContrast => "Set contrast",
            Command::MasterCurrent => "Master current control",
            Command::SetRemap => "Set remap and dual COM mode",
            Command::SetStartLine => "Set display start line",
            Command::SetDisplayOffset => "Set display offset",
            Command::DisplayModeNormal => "Set display mode",
            Command::DisplayModeEntireOn => "Entire display ON",
            Command::SetInvert => "Normal display",
            Command::InverseDisplay => "Inverse display",
            Command::Sleep => "Sleep mode (display OFF)",
            Command::Wake => "Normal mode (display ON)",
            Command::SetMuxRatio => "Set MUX ratio",
            Command::SetClockDivider => "Set clock divider ratio",
            Command::SetPhaseLength => "Set phase length",
            Command::DisplayEnhanceA => "Display enhancement",
            Command::DisplayEnhanceB => "Display enhancement B",
            Command::SetPrecharge => "Set second precharge period",
            Command::SetVcomh => "Set V_COMH deselect level",
            Command::GrayscaleTable => "Set default grayscale table",
            Command::HorizontalScroll => "Horizontal scroll setup",
            Command::ContinuousScroll => "Horizontal scroll setup (continuous)",
            Command::DeactivateScroll => "Deactivate scroll",
            Command::ActivateScroll => "Activate scroll",
            Command::CommandLock => "Set command lock",
        }
    }
}

impl Controller {
    /// Run a decoded command
    ///
    /// `args` holds at least [`Command::arg_count`] bytes; the caller has already
    /// filtered short argument lists.
    pub(super) fn execute(&mut self, command: Command, args: &[u8]) {
        if self.lock == LockState::Locked && command != Command::CommandLock {
            // The lock is informational only
            log::trace!("{} accepted while locked", command.name());
        }

        match command {
            Command::WriteRam => {
                self.enter_phase(Phase::DataWrite);
                return;
            }
            Command::ReadRam => {
                self.enter_phase(Phase::DataRead);
                return;
            }
            // Other opcodes keep the current phase
            _ => {}
        }

        let regs = &mut self.registers;

        match command {
            Command::CommandLock => match args[0] {
                UNLOCK_MAGIC => {
                    self.lock = LockState::Unlocked;
                    log::debug!("Command interface unlocked");
                }
                LOCK_MAGIC => {
                    self.lock = LockState::Locked;
                    log::debug!("Command interface locked");
                }
                other => log::trace!("Ignoring lock argument 0x{:02X}", other),
            },

            Command::Sleep => {
                self.power = PowerState::Asleep;
                log::debug!("Display off");
            }
            Command::Wake => {
                self.power = PowerState::Active;
                log::debug!("Display on");
            }

            Command::SetColumnAddress => {
                self.window.set_columns(u16::from(args[0]), u16::from(args[1]));
                log::debug!("Column window {}..={}", args[0], args[1]);
            }
            Command::SetRowAddress => {
                self.window.set_rows(u16::from(args[0]), u16::from(args[1]));
                log::debug!("Row window {}..={}", args[0], args[1]);
            }

            Command::SetContrast => regs.contrast = args[0],
            Command::MasterCurrent => regs.master_current = args[0] & 0x0F,
            Command::SetInvert => regs.invert = args[0] & 0x01 != 0,
            Command::InverseDisplay => regs.invert = true,
            Command::SetMuxRatio => regs.mux_ratio = args[0],
            Command::SetClockDivider => regs.clock_divider = args[0],
            Command::SetPhaseLength => regs.phase_length = args[0],
            Command::SetPrecharge => regs.precharge = args[0],
            Command::SetVcomh => regs.vcomh = args[0],
            Command::SetRemap => regs.remap = args[0],
            Command::SetStartLine => regs.start_line = args[0] & 0x7F,
            Command::SetDisplayOffset => regs.display_offset = args[0],
            Command::GrayscaleTable => regs.grayscale_table = args[0],
            Command::DisplayEnhanceA => regs.enhance_a = args[0],
            Command::DisplayEnhanceB => regs.enhance_b = args[0],
            Command::DisplayModeNormal => regs.display_mode = DisplayMode::Normal,
            Command::DisplayModeEntireOn => regs.display_mode = DisplayMode::EntireOn,
            Command::DeactivateScroll => regs.scroll_enabled = false,
            Command::ActivateScroll => regs.scroll_enabled = true,

            Command::HorizontalScroll | Command::ContinuousScroll => {
                let mut params = [0u8; 5];
                params.copy_from_slice(&args[..5]);
                regs.scroll_setup = Some(ScrollSetup {
                    continuous: command == Command::ContinuousScroll,
                    params,
                });
                regs.scroll_enabled = true;
            }

            // Phase switch only, handled above
            Command::WriteRam | Command::ReadRam => {}
        }
    }
}
