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

//! Dirty rectangle type

use serde::Serialize;

/// Inclusive axis-aligned rectangle in viewport coordinates
///
/// # Examples
///
/// ```
/// use oled_emu::core::memory::Rect;
///
/// let a = Rect::new(10, 20, 30, 40);
/// let b = Rect::new(5, 25, 12, 50);
/// assert_eq!(a.union(&b), Rect::new(5, 20, 30, 50));
/// assert_eq!(a.width(), 21);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    /// Left column
    pub x0: i32,
    /// Top row
    pub y0: i32,
    /// Right column (inclusive)
    pub x1: i32,
    /// Bottom row (inclusive)
    pub y1: i32,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Whether the rectangle covers no pixel
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x0 > self.x1 || self.y0 > self.y1
    }

    pub fn width(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.x1.abs_diff(self.x0).saturating_add(1)
        }
    }

    pub fn height(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.y1.abs_diff(self.y0).saturating_add(1)
        }
    }
}
