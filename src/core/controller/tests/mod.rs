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

//! Controller module tests
//!
//! Tests are organized into the following modules:
//! - `basic`: Construction, power-on state and reset
//! - `commands`: Opcode dispatch, argument handling and the lock pass-through
//! - `payload`: Write/Read RAM data phase, cursor movement and wraparound
//! - `scenarios`: End-to-end command sequences

mod payload;

use super::Controller;

/// 256×64 SSD1322 in its power-on state
pub(super) fn ssd1322() -> Controller {
    Controller::ssd1322(256, 64).unwrap()
}

/// Unlocked controller with the whole viewport as window, ready for payload
pub(super) fn ssd1322_writing() -> Controller {
    let mut controller = ssd1322();
    controller.process_command(0xFD, &[0xB1]);
    controller.process_command(0x15, &[0, 255]);
    controller.process_command(0x75, &[0, 63]);
    controller.process_command(0x5C, &[]);
    controller
}
