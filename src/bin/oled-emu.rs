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

//! Display controller emulator command-line front end
//!
//! Builds a controller from a TOML configuration (or the SSD1322 preset),
//! optionally sends the standard init sequence, replays a JSON frame trace and
//! prints the resulting panel as ASCII art or the controller status as JSON.

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use oled_emu::core::config::ControllerConfig;
use oled_emu::core::controller::Controller;
use oled_emu::core::error::Result;
use oled_emu::core::memory::Display;
use oled_emu::core::plane::PixelFormat;
use oled_emu::core::protocol::{self, SpiBridge, Trace, CATALOG};

/// Gray ramp used by the preview, darkest first
const RAMP: &[u8] = b" .:-=+*#%@";

/// SSD1322-class OLED controller emulator
#[derive(Parser)]
#[command(name = "oled-emu")]
#[command(about = "Segmented grayscale OLED controller emulator", long_about = None)]
struct Args {
    /// JSON frame trace to replay
    trace: Option<PathBuf>,

    /// Controller configuration (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Viewport width when no configuration is given
    #[arg(long, default_value = "256")]
    width: u16,

    /// Viewport height when no configuration is given
    #[arg(long, default_value = "64")]
    height: u16,

    /// Send the standard initialization sequence first
    #[arg(short = 'i', long)]
    init: bool,

    /// Replay through the SPI bridge instead of framed calls
    #[arg(short = 'b', long)]
    bridge: bool,

    /// Print the viewport as ASCII art
    #[arg(short = 'p', long)]
    preview: bool,

    /// Print the controller status as JSON
    #[arg(short = 's', long)]
    status: bool,

    /// List the recognized commands and exit
    #[arg(long)]
    commands: bool,
}

fn main() -> Result<()> {
    // Optional .env for log level overrides
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.commands {
        for info in CATALOG {
            println!(
                "0x{:02X}  {:<22} {} arg(s)  {}",
                info.code, info.name, info.arg_count, info.description
            );
        }
        return Ok(());
    }

    info!("oled-emu v{}", env!("CARGO_PKG_VERSION"));

    let trace = match &args.trace {
        Some(path) => {
            info!("Loading trace from: {}", path.display());
            Some(Trace::from_file(path).inspect_err(|e| error!("Failed to load trace: {}", e))?)
        }
        None => None,
    };

    let config = match (&args.config, trace.as_ref().and_then(|t| t.config.clone())) {
        (Some(path), _) => {
            info!("Loading configuration from: {}", path.display());
            ControllerConfig::from_file(path)?
        }
        (None, Some(embedded)) => embedded,
        (None, None) => ControllerConfig::ssd1322(args.width, args.height),
    };

    let controller = Controller::new(&config)
        .inspect_err(|e| error!("Invalid controller configuration: {}", e))?;
    info!(
        "Controller {}x{} ({:?}, {}-bit)",
        controller.width(),
        controller.height(),
        controller.pixel_format(),
        controller.color_depth()
    );

    let mut bridge = SpiBridge::new(controller);

    if args.init {
        let frames = protocol::init_sequence(config.width, config.height);
        info!("Sending init sequence ({} frames)", frames.len());
        bridge.send_frames(&frames);
    }

    if let Some(trace) = &trace {
        info!("Replaying {} frames ({} bytes)", trace.frames.len(), trace.wire_len());
        if args.bridge {
            trace.replay_over(&mut bridge);
        } else {
            trace.replay(bridge.controller_mut());
        }
    }

    let controller = bridge.controller();

    if let Some(dirty) = controller.dirty_region() {
        info!(
            "Dirty region: ({}, {})..=({}, {})",
            dirty.x0, dirty.y0, dirty.x1, dirty.y1
        );
    }

    if args.preview {
        print!("{}", render_ascii(controller));
    }

    if args.status {
        println!("{}", serde_json::to_string_pretty(&controller.status())?);
    }

    Ok(())
}

/// Render the viewport with one character per pixel
fn render_ascii(display: &dyn Display) -> String {
    let width = i32::from(display.width());
    let height = i32::from(display.height());
    let format = display.pixel_format();
    let depth = u32::from(display.color_depth()).min(24);
    let max = (1u32 << depth) - 1;

    let mut out = String::with_capacity(((width + 1) * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let value = display.get_pixel(x, y).unwrap_or(0);
            let level = match format {
                PixelFormat::Rgb24 => {
                    let (r, g, b) = ((value >> 16) & 0xFF, (value >> 8) & 0xFF, value & 0xFF);
                    (r * 299 + g * 587 + b * 114) / 1000 * 15 / 255
                }
                _ if max == 0 => 0,
                _ => value.min(max) * 15 / max,
            };
            let index = (level as usize * (RAMP.len() - 1)) / 15;
            out.push(char::from(RAMP[index]));
        }
        out.push('\n');
    }
    out
}
