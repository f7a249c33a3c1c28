// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for screenshots, element dumps, and exports.

pub mod dump;
pub mod export;
pub mod screenshot;
