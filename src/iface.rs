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

//! # Host collaborator stand-ins
//!
//! The packet buffer, batch/splitter machinery, and RPC envelope are host
//! framework concerns this crate deliberately does not implement. This
//! module defines the narrowest Rust shapes the rest of the crate needs
//! from them, so the classifier and control surface are exercisable on
//! their own.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// The one fact the classifier needs from a packet: its destination MAC.
/// A real host implements this against its own buffer type.
pub trait FrameHeader {
    fn dst_mac_octets(&self) -> [u8; 6];
}

/// A batch of frame headers to classify together, standing in for a host's
/// packet batch.
pub struct Batch<'a, F: FrameHeader> {
    frames: &'a [F],
}

impl<'a, F: FrameHeader> Batch<'a, F> {
    pub fn new(frames: &'a [F]) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &'a [F] {
        self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// A generic, tagged argument tree standing in for the host's RPC value
/// type. A host decodes its own wire format into a `CommandArg` tree before
/// calling into [`crate::control`].
#[derive(Debug, Clone, PartialEq)]
pub enum CommandArg {
    Int(i64),
    Str(String),
    List(Vec<CommandArg>),
    Map(BTreeMap<String, CommandArg>),
}

impl CommandArg {
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Self::Int(v) => Ok(*v),
            _ => Err(Error::invalid("expected an integer argument")),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Self::Str(v) => Ok(v),
            _ => Err(Error::invalid("expected a string argument")),
        }
    }

    pub fn as_list(&self) -> Result<&[CommandArg]> {
        match self {
            Self::List(v) => Ok(v),
            _ => Err(Error::invalid("expected a list argument")),
        }
    }

    pub fn as_map(&self) -> Result<&BTreeMap<String, CommandArg>> {
        match self {
            Self::Map(v) => Ok(v),
            _ => Err(Error::invalid("expected a map argument")),
        }
    }

    /// Fetches `key` from a map argument, if present.
    pub fn get(&self, key: &str) -> Result<Option<&CommandArg>> {
        Ok(self.as_map()?.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_get_and_typed_access() {
        let mut m = BTreeMap::new();
        m.insert("count".to_string(), CommandArg::Int(3));
        let arg = CommandArg::Map(m);
        assert_eq!(arg.get("count").unwrap().unwrap().as_int().unwrap(), 3);
        assert!(arg.get("missing").unwrap().is_none());
    }

    #[test]
    fn wrong_shape_is_invalid() {
        let arg = CommandArg::Int(1);
        assert!(arg.as_str().is_err());
        assert!(arg.as_list().is_err());
    }
}
