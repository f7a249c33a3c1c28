// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Core data model: elements, classification, projects, and the
//! client-side visibility set.

pub mod classify;
pub mod element;
pub mod project;
pub mod selection;
