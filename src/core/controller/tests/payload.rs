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

//! Data phase tests
//! Byte decoding per format, cursor movement and wraparound, Read RAM

use super::super::*;
use super::{ssd1322, ssd1322_writing};

fn writing(config: &ControllerConfig) -> Controller {
    let mut controller = Controller::new(config).unwrap();
    controller.process_command(0x5C, &[]);
    controller
}

#[test]
fn test_nibble_order() {
    let mut controller = ssd1322_writing();
    controller.write_data(&[0x21, 0x43]);

    for x in 0..4 {
        assert_eq!(controller.get_pixel(x, 0).unwrap(), (x + 1) as u32);
    }
    assert_eq!(controller.window().cur_col, 4);
    assert_eq!(controller.dirty_region(), Some(Rect::new(0, 0, 3, 0)));
}

#[test]
fn test_window_origin_maps_to_viewport_origin() {
    let mut controller = ssd1322_writing();
    controller.process_command(0x15, &[10, 13]);
    controller.process_command(0x5C, &[]);
    controller.write_data(&[0x21]);

    // Payload is placed relative to the window start
    assert_eq!(controller.get_pixel(0, 0).unwrap(), 1);
    assert_eq!(controller.get_pixel(1, 0).unwrap(), 2);
    assert_eq!(controller.get_pixel(10, 0).unwrap(), 0);
    assert_eq!(controller.window().cur_col, 12);
}

#[test]
fn test_row_wraparound() {
    let mut controller = ssd1322_writing();
    controller.process_command(0x15, &[0, 3]);
    controller.process_command(0x75, &[0, 1]);
    controller.process_command(0x5C, &[]);

    controller.write_data(&[0x11, 0x11]);
    assert_eq!((controller.window().cur_col, controller.window().cur_row), (0, 1));

    controller.write_data(&[0x22, 0x22]);
    assert_eq!((controller.window().cur_col, controller.window().cur_row), (0, 0));

    // Back at the window origin: row 0 is overwritten
    controller.write_data(&[0x33]);

    assert_eq!(controller.get_pixel(0, 0).unwrap(), 3);
    assert_eq!(controller.get_pixel(2, 0).unwrap(), 1);
    assert_eq!(controller.get_pixel(3, 1).unwrap(), 2);
    assert_eq!(controller.get_pixel(4, 0).unwrap(), 0);
}

#[test]
fn test_pixels_outside_viewport_dropped() {
    let mut controller = writing(&ControllerConfig::new(4, 1, PixelFormat::PackedNibble));
    controller.process_command(0x15, &[0, 7]);
    controller.process_command(0x5C, &[]);

    // Window is twice as wide as the viewport
    controller.write_data(&[0x11, 0x11, 0x22, 0x22]);

    assert_eq!(controller.memory().extract_region(0, 0, 3, 0).unwrap(), vec![1, 1, 1, 1]);
    assert_eq!(controller.dirty_region(), Some(Rect::new(0, 0, 3, 0)));
    assert_eq!(controller.window().cur_col, 0);
}

#[test]
fn test_column_address_adjust() {
    let config = ControllerConfig {
        column_address_adjust: 2,
        ..ControllerConfig::ssd1322(256, 64)
    };
    let mut controller = writing(&config);

    controller.write_data(&[0x21, 0x43]);

    // First two decoded pixels land at x = -2, -1 and are dropped
    assert_eq!(controller.get_pixel(0, 0).unwrap(), 3);
    assert_eq!(controller.get_pixel(1, 0).unwrap(), 4);
    assert_eq!(controller.get_pixel(2, 0).unwrap(), 0);
}

#[test]
fn test_packed_bit_payload() {
    let mut controller = writing(&ControllerConfig::ssd1306(128, 64));

    controller.write_data(&[0b1000_0101]);

    assert_eq!(controller.get_pixel(0, 0).unwrap(), 1);
    assert_eq!(controller.get_pixel(1, 0).unwrap(), 0);
    assert_eq!(controller.get_pixel(2, 0).unwrap(), 1);
    assert_eq!(controller.get_pixel(7, 0).unwrap(), 1);
    assert_eq!(controller.window().cur_col, 8);
}

#[test]
fn test_rgb_payload_latches_three_bytes() {
    let mut controller = writing(&ControllerConfig::rgb(8, 2));

    controller.write_data(&[0x12, 0x34]);
    assert_eq!(controller.get_pixel(0, 0).unwrap(), 0);
    assert_eq!(controller.window().cur_col, 0);

    controller.write_data(&[0x56, 0xAB]);
    assert_eq!(controller.get_pixel(0, 0).unwrap(), 0x123456);
    assert_eq!(controller.window().cur_col, 1);

    controller.write_data(&[0xCD, 0xEF]);
    assert_eq!(controller.get_pixel(1, 0).unwrap(), 0xABCDEF);
}

#[test]
fn test_rgb_latch_cleared_by_write_ram() {
    let mut controller = writing(&ControllerConfig::rgb(8, 2));

    controller.write_data(&[0xFF]);
    controller.process_command(0x5C, &[]);
    controller.write_data(&[0x01, 0x02, 0x03]);

    assert_eq!(controller.get_pixel(0, 0).unwrap(), 0x010203);

    controller.process_command(0xAF, &[]);
    controller.process_command(0x5C, &[]);
    controller.write_data(&[0x0A, 0x0B, 0x0C]);
    assert_eq!(controller.get_pixel(1, 0).unwrap(), 0x0A0B0C);
}

#[test]
fn test_rgb_latch_kept_across_register_commands() {
    let mut controller = writing(&ControllerConfig::rgb(8, 2));

    controller.write_data(&[0x01]);
    controller.process_command(0xC1, &[0x40]);
    controller.write_data(&[0x02, 0x03]);

    assert_eq!(controller.get_pixel(0, 0).unwrap(), 0x010203);
    assert_eq!(controller.window().cur_col, 1);
}

#[test]
fn test_write_outside_data_phase_discarded() {
    let mut controller = ssd1322();

    controller.write_data(&[0xFF; 16]);

    assert!(controller.frame_buffer().iter().all(|&b| b == 0));
    assert_eq!(controller.dirty_region(), None);
    assert_eq!(controller.window().cur_col, 0);
}

#[test]
fn test_window_change_keeps_write_phase() {
    let mut controller = ssd1322();
    controller.process_command(0x5C, &[]);
    controller.process_command(0x15, &[0, 255]);
    controller.process_command(0x75, &[3, 63]);
    controller.write_data(&[0xF5]);

    assert_eq!(controller.phase(), Phase::DataWrite);
    assert_eq!(controller.get_pixel(0, 3).unwrap(), 0x5);
    assert_eq!(controller.get_pixel(1, 3).unwrap(), 0xF);
    assert_eq!(controller.window().cur_col, 2);
    assert_eq!(controller.window().cur_row, 3);
}

#[test]
fn test_read_ram_returns_written_bytes() {
    let mut controller = ssd1322_writing();
    controller.write_data(&[0x21, 0x43, 0xF0]);

    controller.process_command(0x15, &[0, 255]);
    controller.process_command(0x5D, &[]);
    assert_eq!(controller.phase(), Phase::DataRead);

    assert_eq!(controller.read_data(4), vec![0x21, 0x43, 0xF0, 0x00]);
    assert_eq!(controller.window().cur_col, 8);
}

#[test]
fn test_read_ram_rgb() {
    let mut controller = writing(&ControllerConfig::rgb(4, 1));
    controller.write_data(&[0x12, 0x34, 0x56]);

    controller.process_command(0x15, &[0, 3]);
    controller.process_command(0x5D, &[]);

    assert_eq!(controller.read_data(4), vec![0x12, 0x34, 0x56, 0x00]);
}

#[test]
fn test_read_outside_read_phase_is_empty() {
    let mut controller = ssd1322_writing();
    assert!(controller.read_data(8).is_empty());
}
