// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Connection initialization, migration execution and PRAGMA handling live
//! here. Everything that can be expressed in Diesel DSL lives in
//! `queries/` and `mutations/`.

pub mod sqlite;
