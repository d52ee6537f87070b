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

//! 4-wire SPI bridge
//!
//! Models the host side of the controller's serial interface: a data/command
//! (DC) select line, an active-low chip select (CS) line and a byte stream.
//!
//! Framing follows the controller's command catalog. A byte received with DC
//! low starts a command; the next `arg_count` bytes are its arguments no matter
//! which level DC has while they arrive. Once the frame is complete it is
//! dispatched to [`Controller::process_command`]. Bytes received with DC high and
//! no command pending go to [`Controller::write_data`].
//!
//! Unknown opcodes are dispatched immediately with no arguments, so the
//! controller sees (and ignores) them exactly as it would a framed call.

use serde::Serialize;

use super::builder::Frame;
use super::lookup;
use crate::core::controller::Controller;

/// Snapshot of the bridge lines and framing state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BridgeStatus {
    /// DC line (`true` = data)
    pub dc: bool,
    /// CS line (`true` = deselected)
    pub cs: bool,
    /// Bytes are currently interpreted as commands
    pub command_mode: bool,
    /// Last opcode seen on the bus
    pub last_command: Option<u8>,
    /// Opcode still waiting for argument bytes
    pub pending: Option<u8>,
}

/// Command whose arguments are still arriving
#[derive(Debug, Clone)]
struct PendingCommand {
    opcode: u8,
    needed: usize,
    args: Vec<u8>,
}

/// SPI front end owning a [`Controller`]
#[derive(Debug, Clone)]
pub struct SpiBridge {
    controller: Controller,
    dc: bool,
    cs: bool,
    pending: Option<PendingCommand>,
    last_command: Option<u8>,
}

impl SpiBridge {
    /// Wrap a controller; DC low (command), CS low (selected)
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            dc: false,
            cs: false,
            pending: None,
            last_command: None,
        }
    }

    /// Drive the DC line (`false` = command, `true` = data)
    #[inline]
    pub fn set_dc(&mut self, data: bool) {
        self.dc = data;
    }

    /// Drive the CS line (`false` = selected, `true` = deselected)
    #[inline]
    pub fn set_cs(&mut self, deselected: bool) {
        self.cs = deselected;
    }

    /// Clock bytes into the controller
    ///
    /// Ignored entirely while CS is high.
    ///
    /// # Example
    ///
    /// ```
    /// use oled_emu::core::controller::Controller;
    /// use oled_emu::core::protocol::SpiBridge;
    ///
    /// let mut bridge = SpiBridge::new(Controller::ssd1322(256, 64).unwrap());
    ///
    /// bridge.write(&[0xFD, 0xB1, 0x5C]);
    /// bridge.set_dc(true);
    /// bridge.write(&[0xF5]);
    ///
    /// assert_eq!(bridge.controller().get_pixel(1, 0).unwrap(), 0xF);
    /// ```
    pub fn write(&mut self, bytes: &[u8]) {
        if self.cs {
            log::trace!("CS high, ignoring {} bytes", bytes.len());
            return;
        }

        let mut rest = bytes;
        while let Some((&byte, tail)) = rest.split_first() {
            if self.pending.is_some() {
                self.push_argument(byte);
            } else if self.dc {
                // No command pending: the rest of the transfer is payload
                self.controller.write_data(rest);
                return;
            } else {
                self.begin_command(byte);
            }
            rest = tail;
        }
    }

    /// Read payload bytes back through the bridge (after Read RAM)
    pub fn read(&mut self, len: usize) -> Vec<u8> {
        if self.cs {
            return Vec::new();
        }
        self.controller.read_data(len)
    }

    /// Send frames, driving DC for each one
    ///
    /// CS is left untouched; frames sent while deselected are dropped.
    pub fn send_frames(&mut self, frames: &[Frame]) {
        for frame in frames {
            match frame {
                Frame::Command { opcode, args } => {
                    self.set_dc(false);
                    self.write(&[*opcode]);
                    self.write(args);
                }
                Frame::Data { bytes } => {
                    self.set_dc(true);
                    self.write(bytes);
                }
                Frame::Reset => self.reset(),
            }
        }
    }

    /// Pulse the reset line: drops any partial frame and resets the controller
    pub fn reset(&mut self) {
        if let Some(pending) = self.pending.take() {
            log::debug!(
                "Reset dropped 0x{:02X} with {} of {} arguments",
                pending.opcode,
                pending.args.len(),
                pending.needed
            );
        }
        self.controller.reset();
    }

    pub fn status(&self) -> BridgeStatus {
        BridgeStatus {
            dc: self.dc,
            cs: self.cs,
            command_mode: !self.dc,
            last_command: self.last_command,
            pending: self.pending.as_ref().map(|p| p.opcode),
        }
    }

    #[inline]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    #[inline]
    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn into_controller(self) -> Controller {
        self.controller
    }

    fn begin_command(&mut self, opcode: u8) {
        self.last_command = Some(opcode);

        match lookup(opcode) {
            Some(info) if info.arg_count > 0 => {
                self.pending = Some(PendingCommand {
                    opcode,
                    needed: info.arg_count,
                    args: Vec::with_capacity(info.arg_count),
                });
            }
            Some(_) => self.controller.process_command(opcode, &[]),
            None => {
                log::warn!("Unknown command byte 0x{:02X}", opcode);
                self.controller.process_command(opcode, &[]);
            }
        }
    }

    fn push_argument(&mut self, byte: u8) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };

        pending.args.push(byte);
        if pending.args.len() < pending.needed {
            return;
        }

        if let Some(done) = self.pending.take() {
            self.controller.process_command(done.opcode, &done.args);
        }
    }
}
