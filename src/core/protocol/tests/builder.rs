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

use super::super::*;
use super::ssd1322;
use crate::core::controller::{LockState, Phase, PowerState};
use crate::core::memory::Rect;

#[test]
fn test_builder_merges_adjacent_data() {
    let frames = CommandBuilder::new()
        .command(0x5C, &[])
        .data(&[1, 2])
        .data(&[3])
        .command(0xAF, &[])
        .data(&[4])
        .build();

    assert_eq!(
        frames,
        vec![
            Frame::command(0x5C, &[]),
            Frame::data(&[1, 2, 3]),
            Frame::command(0xAF, &[]),
            Frame::data(&[4]),
        ]
    );
}

#[test]
fn test_window_clamps_to_byte_addresses() {
    let frames = CommandBuilder::new().window(480, 64).build();
    assert_eq!(
        frames,
        vec![Frame::command(0x15, &[0, 255]), Frame::command(0x75, &[0, 63])]
    );
}

#[test]
fn test_wire_len() {
    assert_eq!(Frame::command(0x15, &[0, 1]).wire_len(), 3);
    assert_eq!(Frame::data(&[0; 7]).wire_len(), 7);
    assert_eq!(Frame::Reset.wire_len(), 0);
}

#[test]
fn test_init_sequence_brings_panel_up() {
    let mut controller = ssd1322();

    for frame in init_sequence(256, 64) {
        frame.apply(&mut controller);
    }

    assert_eq!(controller.lock_state(), LockState::Unlocked);
    assert_eq!(controller.power_state(), PowerState::Active);
    assert_eq!(controller.phase(), Phase::Command);
    assert_eq!(controller.registers().mux_ratio, 63);
    assert_eq!(controller.registers().phase_length, 0xE2);
    assert!(!controller.registers().invert);

    let window = controller.window();
    assert_eq!((window.col_start, window.col_end), (0, 255));
    assert_eq!((window.row_start, window.row_end), (0, 63));
}

#[test]
fn test_fill_screen_covers_viewport() {
    let mut controller = ssd1322();

    for frame in fill_screen(256, 64, 0x7) {
        frame.apply(&mut controller);
    }

    assert_eq!(controller.dirty_region(), Some(Rect::new(0, 0, 255, 63)));
    assert_eq!(controller.get_pixel(0, 0).unwrap(), 0x7);
    assert_eq!(controller.get_pixel(255, 63).unwrap(), 0x7);
    assert_eq!(controller.memory().extract_region(0, 0, 255, 63).unwrap().len(), 256 * 64);
}

#[test]
fn test_fill_screen_masks_level() {
    let frames = fill_screen(2, 1, 0x1F);
    assert_eq!(frames.last(), Some(&Frame::data(&[0xFF])));
}

#[test]
fn test_draw_pixel_frames() {
    let frames = draw_pixel(10, 5, 0x3);
    assert_eq!(
        frames,
        vec![
            Frame::command(0x15, &[10, 10]),
            Frame::command(0x75, &[5, 5]),
            Frame::command(0x5C, &[]),
            Frame::data(&[0x33]),
        ]
    );

    let mut controller = ssd1322();
    for frame in &frames {
        frame.apply(&mut controller);
    }

    // Window-relative placement on row 5
    assert_eq!(controller.get_pixel(0, 5).unwrap(), 0x3);
    assert_eq!(controller.get_pixel(1, 5).unwrap(), 0x3);
    assert_eq!(controller.get_pixel(2, 5).unwrap(), 0);
    assert_eq!(controller.dirty_region(), Some(Rect::new(0, 5, 1, 5)));
    assert_eq!(controller.window().cur_col, 10);
}

#[test]
fn test_scalar_helpers() {
    let mut controller = ssd1322();

    for frame in contrast(0x20)
        .into_iter()
        .chain(inversion(true))
        .chain(power(true))
    {
        frame.apply(&mut controller);
    }
    assert_eq!(controller.registers().contrast, 0x20);
    assert!(controller.registers().invert);
    assert!(controller.is_display_on());

    for frame in inversion(false).into_iter().chain(power(false)) {
        frame.apply(&mut controller);
    }
    assert!(!controller.registers().invert);
    assert!(!controller.is_display_on());
}

#[test]
fn test_reset_frame() {
    let mut controller = ssd1322();
    let frames = CommandBuilder::new().unlock().command(0xAF, &[]).reset().build();

    for frame in &frames {
        frame.apply(&mut controller);
    }

    assert_eq!(controller.lock_state(), LockState::Locked);
    assert!(!controller.is_display_on());
}
