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

//! Test fixtures for common test scenarios

use oled_emu::core::config::ControllerConfig;
use oled_emu::core::controller::Controller;
use oled_emu::core::protocol::{self, Frame, SpiBridge};

/// 256×64 SSD1322 in its power-on state
#[allow(dead_code)]
pub fn create_ssd1322() -> Controller {
    Controller::ssd1322(256, 64).expect("valid SSD1322 geometry")
}

/// SSD1322 that has received the standard init sequence
#[allow(dead_code)]
pub fn create_initialized_ssd1322() -> Controller {
    let mut controller = create_ssd1322();
    apply_frames(&mut controller, &protocol::init_sequence(256, 64));
    controller.clear_dirty();
    controller
}

/// SPI bridge over a fresh SSD1322
#[allow(dead_code)]
pub fn create_bridge() -> SpiBridge {
    SpiBridge::new(create_ssd1322())
}

/// Controller built from a configuration
#[allow(dead_code)]
pub fn create_controller(config: &ControllerConfig) -> Controller {
    Controller::new(config).expect("valid controller configuration")
}

/// Deliver frames straight to a controller
#[allow(dead_code)]
pub fn apply_frames(controller: &mut Controller, frames: &[Frame]) {
    for frame in frames {
        frame.apply(controller);
    }
}
