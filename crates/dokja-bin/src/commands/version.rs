// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

use crate::error::BinResult;

/// Prints version information for all components.
pub fn version() -> BinResult<()> {
    println!("dokja v{}", crate::VERSION);
    println!("  dokja-auth v{}", dokja_auth::VERSION);
    println!("  dokja-api  v{}", dokja_api::VERSION);
    Ok(())
}
