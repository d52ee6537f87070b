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

//! Recorded frame traces
//!
//! A trace is a JSON document holding the frames a host sent, optionally with
//! the panel configuration they were captured against:
//!
//! ```json
//! {
//!   "config": { "width": 256, "height": 64, "pixel_format": "packed_nibble" },
//!   "frames": [
//!     { "kind": "command", "opcode": 253, "args": [177] },
//!     { "kind": "command", "opcode": 92 },
//!     { "kind": "data", "bytes": [245] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::builder::Frame;
use super::bridge::SpiBridge;
use crate::core::config::ControllerConfig;
use crate::core::controller::Controller;
use crate::core::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Panel the trace was captured against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ControllerConfig>,

    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl Trace {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            config: None,
            frames,
        }
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Parse a JSON trace
    ///
    /// An embedded config is normalized and must pass
    /// [`ControllerConfig::validate`].
    pub fn from_json_str(text: &str) -> Result<Self> {
        let mut trace: Trace = serde_json::from_str(text)?;
        if let Some(config) = trace.config.take() {
            let config = config.normalized();
            config.validate()?;
            trace.config = Some(config);
        }
        Ok(trace)
    }

    /// Load a trace from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let trace = Self::from_json_str(&text)?;
        log::debug!("Loaded trace {} ({} frames)", path.display(), trace.frames.len());
        Ok(trace)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the trace as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Apply every frame directly to a controller
    pub fn replay(&self, controller: &mut Controller) {
        for frame in &self.frames {
            frame.apply(controller);
        }
    }

    /// Send every frame through an SPI bridge
    pub fn replay_over(&self, bridge: &mut SpiBridge) {
        bridge.send_frames(&self.frames);
    }

    /// Total bytes the trace puts on the bus
    pub fn wire_len(&self) -> usize {
        self.frames.iter().map(Frame::wire_len).sum()
    }
}

impl From<Vec<Frame>> for Trace {
    fn from(frames: Vec<Frame>) -> Self {
        Self::new(frames)
    }
}
