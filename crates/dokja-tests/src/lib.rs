// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # dokja-tests
//!
//! Integration tests for the dokja platform, plus the shared fixtures
//! they run on. The actual tests live under `tests/`.

pub mod common;
