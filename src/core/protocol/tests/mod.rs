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

//! Protocol module tests
//!
//! - `catalog`: Opcode catalog contents and lookup
//! - `builder`: Frame construction and canned sequences
//! - `bridge`: SPI framing, DC/CS handling and reset
//! - `trace`: JSON traces and replay

mod builder;

use crate::core::controller::Controller;

pub(super) fn ssd1322() -> Controller {
    Controller::ssd1322(256, 64).unwrap()
}
