/*
 * Created on Tue Jul 28 2026
 *
 * This file is a part of l2fwd
 * l2fwd is a free and open-source L2 (Ethernet) forwarding classifier: a
 * cuckoo-hashed MAC-to-gate table meant to sit in a software
 * packet-switching dataplane.
 *
 * Copyright (c) 2026, the l2fwd authors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

//! # l2fwd
//!
//! A cuckoo-hashed MAC→gate classifier for a software packet-switching
//! dataplane: a two-choice hash table with SIMD-accelerated bucket search,
//! a concurrent front-end that classifies whole batches of frames at
//! once, and a small control surface (`add`/`delete`/`lookup`/
//! `set_default_gate`/`populate`) for managing it from outside the hot
//! path.
//!
//! The packet buffer type, batch/splitter machinery, and RPC transport are
//! a host framework's job; this crate only defines the narrow interfaces
//! in [`iface`] that it needs from them.

pub mod classifier;
pub mod config;
pub mod control;
pub mod error;
pub mod iface;
pub mod mac;
pub mod table;

pub use classifier::Classifier;
pub use config::TableConfig;
pub use error::{Error, Result};
pub use mac::MacAddr;
pub use table::Table;
