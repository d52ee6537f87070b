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

//! Segmented grayscale OLED controller emulator library
//!
//! This library emulates the command interface and display RAM of an
//! SSD1322-class display controller: framed commands, a windowed write cursor,
//! format-aware VRAM packing and dirty-region tracking for renderers.
//!
//! # Example
//!
//! ```
//! use oled_emu::core::controller::Controller;
//! use oled_emu::core::protocol;
//!
//! let mut controller = Controller::ssd1322(256, 64).unwrap();
//!
//! for frame in protocol::init_sequence(256, 64) {
//!     frame.apply(&mut controller);
//! }
//! for frame in protocol::fill_screen(256, 64, 0x8) {
//!     frame.apply(&mut controller);
//! }
//!
//! assert!(controller.is_display_on());
//! assert_eq!(controller.get_pixel(100, 30).unwrap(), 0x8);
//! ```

pub mod core;
