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

mod common;

use common::assertions::{assert_blank, assert_pixel, assert_rect_filled};
use common::fixtures::{
    apply_frames, create_bridge, create_controller, create_initialized_ssd1322, create_ssd1322,
};
use oled_emu::core::config::ControllerConfig;
use oled_emu::core::controller::{LockState, Phase, PowerState};
use oled_emu::core::error::{DisplayError, Result};
use oled_emu::core::memory::Rect;
use oled_emu::core::plane::PixelFormat;
use oled_emu::core::protocol::{self, CommandBuilder, Frame, Trace};

#[test]
fn test_power_on_state() {
    let controller = create_ssd1322();

    assert_eq!(controller.lock_state(), LockState::Locked);
    assert_eq!(controller.phase(), Phase::Command);
    assert_eq!(controller.power_state(), PowerState::Asleep);
    assert_eq!(controller.dirty_region(), None);
    assert_blank(&controller);
}

#[test]
fn test_unlock_and_write_single_byte() {
    let mut controller = create_ssd1322();
    let frames = CommandBuilder::new()
        .unlock()
        .window(256, 64)
        .command(0x5C, &[])
        .data(&[0xF5])
        .build();

    apply_frames(&mut controller, &frames);

    assert_pixel(&controller, 0, 0, 0x5);
    assert_pixel(&controller, 1, 0, 0xF);
}

#[test]
fn test_narrow_window_wraps_to_start() {
    let mut controller = create_ssd1322();
    apply_frames(
        &mut controller,
        &[
            Frame::command(0x15, &[254, 255]),
            Frame::command(0x75, &[0, 0]),
            Frame::command(0x5C, &[]),
            Frame::data(&[0x12, 0x34, 0x56]),
        ],
    );

    let window = controller.window();
    assert_eq!((window.cur_col, window.cur_row), (254, 0));
}

#[test]
fn test_unknown_opcode_is_ignored() {
    let mut controller = create_initialized_ssd1322();
    let before = controller.status();

    controller.process_command(0x00, &[1, 2, 3, 4, 5]);

    assert_eq!(controller.status(), before);
}

#[test]
fn test_out_of_bounds_access() {
    let mut controller = create_ssd1322();

    assert_eq!(
        controller.get_pixel(-1, 0),
        Err(DisplayError::OutOfBounds { x: -1, y: 0 })
    );
    assert_eq!(
        controller.set_pixel(300, 0, 0xF),
        Err(DisplayError::OutOfBounds { x: 300, y: 0 })
    );
    assert!(controller.frame_buffer().iter().all(|&b| b == 0));
}

#[test]
fn test_fill_screen_through_bridge() {
    let mut bridge = create_bridge();

    bridge.send_frames(&protocol::init_sequence(256, 64));
    bridge.controller_mut().clear_dirty();
    bridge.send_frames(&protocol::fill_screen(256, 64, 0xC));

    let controller = bridge.controller();
    assert_rect_filled(controller, 0, 0, 255, 63, 0xC);
    assert_eq!(controller.dirty_region(), Some(Rect::new(0, 0, 255, 63)));
    assert_eq!(bridge.status().last_command, Some(0x5C));
}

#[test]
fn test_raw_byte_stream_through_bridge() {
    let mut bridge = create_bridge();

    // Unlock, 4-column window on row 2, Write RAM
    bridge.write(&[0xFD, 0xB1, 0x15, 0, 3, 0x75, 2, 2, 0x5C]);
    bridge.set_dc(true);
    bridge.write(&[0x21, 0x43, 0x65]);

    let controller = bridge.controller();
    assert_pixel(controller, 0, 2, 5);
    assert_pixel(controller, 1, 2, 6);
    assert_pixel(controller, 2, 2, 3);
    assert_pixel(controller, 3, 2, 4);
}

#[test]
fn test_monochrome_panel() {
    let mut controller = create_controller(&ControllerConfig::ssd1306(128, 64));
    apply_frames(
        &mut controller,
        &[Frame::command(0x5C, &[]), Frame::data(&[0xFF, 0x01])],
    );

    assert_rect_filled(&controller, 0, 0, 8, 0, 1);
    assert_pixel(&controller, 9, 0, 0);
    assert_eq!(controller.pixel_format(), PixelFormat::PackedBit);
    // 128×64 at one bit per pixel
    assert_eq!(controller.frame_buffer().len(), 1024);
}

#[test]
fn test_rgb_panel() {
    let mut controller = create_controller(&ControllerConfig::rgb(16, 4));
    apply_frames(
        &mut controller,
        &[
            Frame::command(0x5C, &[]),
            Frame::data(&[0xFF, 0x80, 0x00, 0x00, 0x00, 0xFF]),
        ],
    );

    assert_pixel(&controller, 0, 0, 0xFF8000);
    assert_pixel(&controller, 1, 0, 0x0000FF);
    assert_eq!(controller.color_depth(), 24);
}

#[test]
fn test_trace_file_replay() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("boot.json");

    let frames = protocol::init_sequence(256, 64)
        .into_iter()
        .chain(protocol::fill_screen(256, 64, 0x4))
        .collect::<Vec<_>>();
    Trace::new(frames)
        .with_config(ControllerConfig::ssd1322(256, 64))
        .save(&path)?;

    let trace = Trace::from_file(&path)?;
    let config = trace.config.clone().unwrap_or_default();
    let mut controller = create_controller(&config);
    trace.replay(&mut controller);

    assert!(controller.is_display_on());
    assert_rect_filled(&controller, 0, 0, 255, 63, 0x4);
    Ok(())
}

#[test]
fn test_config_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("panel.toml");
    std::fs::write(
        &path,
        "width = 128\nheight = 32\npixel_format = \"packed_nibble\"\ncolumn_offset = 8\nplane_width = 160\n",
    )?;

    let config = ControllerConfig::from_file(&path)?;
    let mut controller = create_controller(&config);
    controller.set_pixel(0, 0, 0x9)?;

    // Viewport column 0 sits at plane column 8, i.e. byte 4
    assert_eq!(controller.frame_buffer()[4], 0x09);
    assert_eq!(controller.frame_buffer().len(), 160 * 32 / 2);
    Ok(())
}

#[test]
fn test_reset_restores_power_on() {
    let mut controller = create_initialized_ssd1322();
    apply_frames(&mut controller, &protocol::fill_screen(256, 64, 0xF));

    apply_frames(&mut controller, &[Frame::Reset]);

    assert_eq!(controller.lock_state(), LockState::Locked);
    assert_eq!(controller.power_state(), PowerState::Asleep);
    assert_eq!(controller.dirty_region(), Some(Rect::new(0, 0, 255, 63)));
    assert_blank(&controller);
}
