// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Drizz application.

pub mod canvas;
pub mod panel;
pub mod projects;
pub mod toolbar;
