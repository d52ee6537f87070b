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

//! Transport layer
//!
//! Everything that sits between a host driver and the [`Controller`]:
//!
//! - The command catalog ([`CATALOG`], [`lookup`]): opcode, name, description
//!   and argument count for every recognized command
//! - [`Frame`] and [`CommandBuilder`]: framed command/data sequences plus the
//!   canned sequences a driver typically sends
//! - [`SpiBridge`]: a 4-wire SPI model (DC and CS pins) that frames a raw byte
//!   stream using the catalog
//! - [`Trace`]: JSON-serialized frame lists for offline replay
//!
//! The controller never needs this module; it only accepts already-framed
//! `(opcode, arguments)` pairs and payload bytes.
//!
//! [`Controller`]: crate::core::controller::Controller

mod bridge;
mod builder;
mod trace;
#[cfg(test)]
mod tests;

pub use bridge::{BridgeStatus, SpiBridge};
pub use builder::{
    contrast, draw_pixel, fill_screen, init_sequence, inversion, power, CommandBuilder, Frame,
};
pub use trace::Trace;

use serde::Serialize;

use crate::core::controller::Command;

/// Catalog entry for one recognized opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandInfo {
    pub code: u8,
    pub name: &'static str,
    pub description: &'static str,
    /// Argument bytes that follow the opcode
    pub arg_count: usize,
}

impl CommandInfo {
    pub const fn of(command: Command) -> Self {
        Self {
            code: command.opcode(),
            name: command.name(),
            description: command.description(),
            arg_count: command.arg_count(),
        }
    }
}

/// Every recognized command, in opcode table order
pub const CATALOG: [CommandInfo; Command::ALL.len()] = build_catalog();

const fn build_catalog() -> [CommandInfo; Command::ALL.len()] {
    let mut catalog = [CommandInfo::of(Command::ALL[0]); Command::ALL.len()];
    let mut i = 1;
    while i < Command::ALL.len() {
        catalog[i] = CommandInfo::of(Command::ALL[i]);
        i += 1;
    }
    catalog
}

/// Look up catalog information for an opcode
///
/// # Examples
///
/// ```
/// use oled_emu::core::protocol;
///
/// let info = protocol::lookup(0x15).unwrap();
/// assert_eq!(info.name, "SetColumnAddress");
/// assert_eq!(info.arg_count, 2);
///
/// assert!(protocol::lookup(0x00).is_none());
/// ```
pub fn lookup(code: u8) -> Option<CommandInfo> {
    Command::decode(code).map(CommandInfo::of)
}
