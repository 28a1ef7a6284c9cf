// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side operations.
//!
//! Every mutation that touches more than one row runs in a single
//! transaction.

pub mod incidents;
pub mod roster;
