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

//! # Error model
//!
//! A hand-rolled [`Error`] enum with manual `Display`/`From` impls.

use std::fmt;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All error kinds the table engine and control surface can raise.
///
/// Every variant carries a short human-readable message; for MAC-keyed
/// operations the message includes the offending MAC string, per the
/// error handling contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed argument: non-power-of-two size/bucket, unparseable MAC,
    /// out-of-range gate, or a wrongly shaped command argument.
    Invalid(String),
    /// `find`/`delete`/`lookup` targeted a MAC that is not present.
    NotFound(String),
    /// `add` targeted a MAC that is already present.
    AlreadyExists(String),
    /// `add` could not find or make room for a new entry.
    OutOfSpace(String),
    /// Table allocation failed at `init`.
    OutOfMemory,
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub(crate) fn not_found(addr: impl fmt::Display) -> Self {
        Self::NotFound(format!("MAC address '{addr}' does not exist"))
    }

    pub(crate) fn already_exists(addr: impl fmt::Display) -> Self {
        Self::AlreadyExists(format!("MAC address '{addr}' already exists"))
    }

    pub(crate) fn out_of_space(addr: impl fmt::Display) -> Self {
        Self::OutOfSpace(format!(
            "no free slot for MAC address '{addr}' after one displacement attempt"
        ))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(msg) => write!(f, "invalid argument: {msg}"),
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
            Self::AlreadyExists(msg) => write!(f, "already exists: {msg}"),
            Self::OutOfSpace(msg) => write!(f, "out of space: {msg}"),
            Self::OutOfMemory => write!(f, "out of memory: table allocation failed"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Self {
        Self::invalid(format!("malformed integer: {e}"))
    }
}
