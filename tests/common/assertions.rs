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

//! Custom assertions for controller testing

use oled_emu::core::memory::Display;

/// Assert a viewport pixel has the expected value
#[allow(dead_code)]
pub fn assert_pixel(display: &dyn Display, x: i32, y: i32, expected: u32) {
    let actual = display
        .get_pixel(x, y)
        .unwrap_or_else(|e| panic!("Pixel ({}, {}) unreadable: {}", x, y, e));
    assert_eq!(
        actual, expected,
        "Pixel ({}, {}) mismatch: expected 0x{:X}, got 0x{:X}",
        x, y, expected, actual
    );
}

/// Assert every pixel of a rectangle (inclusive) has the expected value
#[allow(dead_code)]
pub fn assert_rect_filled(
    display: &dyn Display,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    expected: u32,
) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            assert_pixel(display, x, y, expected);
        }
    }
}

/// Assert the whole viewport holds zero
#[allow(dead_code)]
pub fn assert_blank(display: &dyn Display) {
    let x1 = i32::from(display.width()) - 1;
    let y1 = i32::from(display.height()) - 1;
    assert_rect_filled(display, 0, 0, x1, y1, 0);
}
