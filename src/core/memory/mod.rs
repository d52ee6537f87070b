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

//! Display memory (VRAM) with dirty-region tracking
//!
//! [`DisplayMemory`] owns the VRAM buffer of one controller. Pixel access goes
//! through a [`PixelPlane`] sized to the controller's internal addressable plane,
//! while bounds checks and dirty tracking are done in viewport coordinates.
//!
//! # Viewport vs. plane
//!
//! ```text
//!  plane column:  0 ........ column_offset ............ column_offset + width - 1 ... plane_width - 1
//!  viewport x:                0 ........................ width - 1
//! ```
//!
//! # Dirty tracking
//!
//! Every successful write grows a single bounding box. The box never shrinks
//! until [`DisplayMemory::clear_dirty`] is called, so it always covers every
//! pixel modified since the last acknowledgement.

mod region;

pub use region::Rect;

use crate::core::config::ControllerConfig;
use crate::core::error::DisplayError;
use crate::core::plane::{PixelFormat, PixelPlane};

/// Pixel-level interface offered to drawing and visualization layers
///
/// Rasterizers, text renderers and preview windows only need this trait, so
/// they can target either a bare [`DisplayMemory`] or a full controller.
pub trait Display {
    /// Viewport width in pixels
    fn width(&self) -> u16;

    /// Viewport height in pixels
    fn height(&self) -> u16;

    /// Bits per pixel
    fn color_depth(&self) -> u8;

    /// VRAM packing format
    fn pixel_format(&self) -> PixelFormat;

    /// Write one pixel in viewport coordinates
    fn set_pixel(&mut self, x: i32, y: i32, value: u32) -> Result<(), DisplayError>;

    /// Read one pixel in viewport coordinates
    fn get_pixel(&self, x: i32, y: i32) -> Result<u32, DisplayError>;

    /// Bounding box of pixels changed since the last [`Display::clear_dirty`]
    fn dirty_region(&self) -> Option<Rect>;

    /// Acknowledge the dirty region
    fn clear_dirty(&mut self);
}

/// VRAM buffer and dirty region of one display
///
/// # Examples
///
/// ```
/// use oled_emu::core::config::ControllerConfig;
/// use oled_emu::core::memory::{DisplayMemory, Rect};
///
/// let mut memory = DisplayMemory::new(&ControllerConfig::ssd1322(256, 64)).unwrap();
/// assert_eq!(memory.dirty_region(), None);
///
/// memory.set_pixel(10, 5, 0xF).unwrap();
/// assert_eq!(memory.get_pixel(10, 5).unwrap(), 0xF);
/// assert_eq!(memory.dirty_region(), Some(Rect::new(10, 5, 10, 5)));
/// ```
#[derive(Debug, Clone)]
pub struct DisplayMemory {
    /// Raw VRAM, sized once from the plane dimensions
    vram: Vec<u8>,

    /// Addressing for the internal plane
    plane: PixelPlane,

    width: u16,
    height: u16,
    color_depth: u8,
    column_offset: u16,

    /// Accumulated dirty box, `None` when clean
    dirty: Option<Rect>,
}

impl DisplayMemory {
    /// Allocate VRAM for a configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` or `PlaneTooSmall` if the configuration's
    /// geometry is unusable.
    pub fn new(config: &ControllerConfig) -> Result<Self, DisplayError> {
        let config = config.clone().normalized();
        config.validate()?;

        let plane = PixelPlane::new(config.pixel_format, config.plane_width, config.plane_height);

        log::debug!(
            "Allocating {} bytes of VRAM ({:?}, plane {}x{}, viewport {}x{})",
            plane.vram_len(),
            config.pixel_format,
            config.plane_width,
            config.plane_height,
            config.width,
            config.height
        );

        Ok(Self {
            vram: vec![0; plane.vram_len()],
            plane,
            width: config.width,
            height: config.height,
            color_depth: config.color_depth,
            column_offset: config.column_offset,
            dirty: None,
        })
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn color_depth(&self) -> u8 {
        self.color_depth
    }

    #[inline]
    pub fn pixel_format(&self) -> PixelFormat {
        self.plane.format()
    }

    /// Addressing used for the backing plane
    #[inline]
    pub fn plane(&self) -> &PixelPlane {
        &self.plane
    }

    /// Raw VRAM contents (the controller's frame buffer)
    #[inline]
    pub fn vram(&self) -> &[u8] {
        &self.vram
    }

    /// Whether `(x, y)` lies inside the viewport
    #[inline]
    pub fn in_viewport(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height)
    }

    /// Plane column for a viewport column
    #[inline]
    fn plane_x(&self, x: i32) -> i32 {
        x + i32::from(self.column_offset)
    }

    /// Write one pixel
    ///
    /// # Arguments
    ///
    /// * `x` - Viewport column
    /// * `y` - Viewport row
    /// * `value` - Pixel value, truncated to the format's bit width
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if the coordinate is outside the viewport. Nothing is
    /// written and the dirty region is unchanged in that case.
    pub fn set_pixel(&mut self, x: i32, y: i32, value: u32) -> Result<(), DisplayError> {
        if !self.in_viewport(x, y) {
            return Err(DisplayError::OutOfBounds { x, y });
        }

        let plane_x = self.plane_x(x);
        self.plane.write_pixel(&mut self.vram, plane_x, y, value)?;
        self.mark_dirty(x, y, x, y);
        Ok(())
    }

    /// Read one pixel
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if the coordinate is outside the viewport.
    pub fn get_pixel(&self, x: i32, y: i32) -> Result<u32, DisplayError> {
        if !self.in_viewport(x, y) {
            return Err(DisplayError::OutOfBounds { x, y });
        }

        self.plane.read_pixel(&self.vram, self.plane_x(x), y)
    }

    /// Fill an inclusive viewport rectangle
    ///
    /// The rectangle must lie entirely inside the viewport; inverted rectangles
    /// are a no-op. The filled area is marked dirty.
    pub fn fill_rect(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        value: u32,
    ) -> Result<(), DisplayError> {
        if x0 > x1 || y0 > y1 {
            return Ok(());
        }
        if !self.in_viewport(x0, y0) {
            return Err(DisplayError::OutOfBounds { x: x0, y: y0 });
        }
        if !self.in_viewport(x1, y1) {
            return Err(DisplayError::OutOfBounds { x: x1, y: y1 });
        }

        let (px0, px1) = (self.plane_x(x0), self.plane_x(x1));
        self.plane.fill_region(&mut self.vram, px0, y0, px1, y1, value)?;
        self.mark_dirty(x0, y0, x1, y1);
        Ok(())
    }

    /// Copy the values of an inclusive viewport rectangle, row-major
    pub fn extract_region(
        &self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> Result<Vec<u32>, DisplayError> {
        if x0 > x1 || y0 > y1 {
            return Ok(Vec::new());
        }
        if !self.in_viewport(x0, y0) {
            return Err(DisplayError::OutOfBounds { x: x0, y: y0 });
        }
        if !self.in_viewport(x1, y1) {
            return Err(DisplayError::OutOfBounds { x: x1, y: y1 });
        }

        self.plane
            .extract_region(&self.vram, self.plane_x(x0), y0, self.plane_x(x1), y1)
    }

    /// Mark a rectangle as changed
    ///
    /// The rectangle is clamped to the viewport first. A rectangle that lies
    /// completely outside the viewport marks nothing. Otherwise it is merged
    /// into the current region by component-wise min/max.
    pub fn mark_dirty(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let clamped = Rect::new(
            x0.max(0),
            y0.max(0),
            x1.min(i32::from(self.width) - 1),
            y1.min(i32::from(self.height) - 1),
        );

        if clamped.is_empty() {
            return;
        }

        self.dirty = Some(match self.dirty {
            Some(current) => current.union(&clamped),
            None => clamped,
        });
    }

    /// Current dirty region
    #[inline]
    pub fn dirty_region(&self) -> Option<Rect> {
        self.dirty
    }

    /// Forget the dirty region
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = None;
    }

    /// Zero VRAM and mark the whole viewport dirty
    pub fn reset(&mut self) {
        self.vram.fill(0);
        self.dirty = None;
        self.mark_dirty(0, 0, i32::from(self.width) - 1, i32::from(self.height) - 1);
    }
}

impl Display for DisplayMemory {
    fn width(&self) -> u16 {
        Self::width(self)
    }

    fn height(&self) -> u16 {
        Self::height(self)
    }

    fn color_depth(&self) -> u8 {
        Self::color_depth(self)
    }

    fn pixel_format(&self) -> PixelFormat {
        Self::pixel_format(self)
    }

    fn set_pixel(&mut self, x: i32, y: i32, value: u32) -> Result<(), DisplayError> {
        Self::set_pixel(self, x, y, value)
    }

    fn get_pixel(&self, x: i32, y: i32) -> Result<u32, DisplayError> {
        Self::get_pixel(self, x, y)
    }

    fn dirty_region(&self) -> Option<Rect> {
        Self::dirty_region(self)
    }

    fn clear_dirty(&mut self) {
        Self::clear_dirty(self)
    }
}
