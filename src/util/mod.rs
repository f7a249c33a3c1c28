// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utilities shared by rendering and hit-testing.

pub mod geometry;
