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

//! # Module-init configuration
//!
//! Mirrors the module-init argument map: an optional table `size` and
//! `bucket` width, each defaulting independently.

use crate::error::{Error, Result};
use serde::Deserialize;

/// Maximum table size: 2^26 buckets.
pub const MAX_TABLE_SIZE: u32 = 1 << 26;
/// Maximum bucket width.
pub const MAX_BUCKET_SIZE: u8 = 4;

/// The `size`/`bucket` pair a table is constructed from.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TableConfig {
    #[serde(default = "TableConfig::default_size")]
    pub size: u32,
    #[serde(default = "TableConfig::default_bucket")]
    pub bucket: u8,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            size: Self::default_size(),
            bucket: Self::default_bucket(),
        }
    }
}

impl TableConfig {
    fn default_size() -> u32 {
        1024
    }

    fn default_bucket() -> u8 {
        MAX_BUCKET_SIZE
    }

    /// Validates `size` and `bucket`: both must be a power of two, greater
    /// than zero, and no larger than their respective maximums.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || self.size > MAX_TABLE_SIZE || !self.size.is_power_of_two() {
            return Err(Error::invalid(format!(
                "size must be a power of two in [1, {MAX_TABLE_SIZE}], got {}",
                self.size
            )));
        }
        if self.bucket == 0 || self.bucket > MAX_BUCKET_SIZE || !self.bucket.is_power_of_two() {
            return Err(Error::invalid(format!(
                "bucket must be a power of two in [1, {MAX_BUCKET_SIZE}], got {}",
                self.bucket
            )));
        }
        Ok(())
    }

    /// `log2(size)`, used by the alternate-index formula.
    pub(crate) fn size_power(&self) -> u32 {
        self.size.trailing_zeros()
    }

    /// Builds a config from a module-init argument map. `size`/`bucket`
    /// entries of `0` are treated the same as an absent entry (fall back
    /// to the default), matching the module-init convention where `0`
    /// means "caller didn't care".
    pub fn from_arg(arg: &crate::iface::CommandArg) -> Result<Self> {
        let map = arg.as_map()?;
        let size = match map.get("size") {
            Some(v) => v.as_int()? as u32,
            None => 0,
        };
        let bucket = match map.get("bucket") {
            Some(v) => v.as_int()? as u8,
            None => 0,
        };
        let cfg = Self {
            size: if size == 0 { Self::default_size() } else { size },
            bucket: if bucket == 0 { Self::default_bucket() } else { bucket },
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(TableConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_power_of_two() {
        let cfg = TableConfig { size: 1000, bucket: 4 };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_oversized_bucket() {
        let cfg = TableConfig { size: 1024, bucket: 8 };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_size() {
        let cfg = TableConfig { size: 0, bucket: 4 };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn size_power_matches_log2() {
        let cfg = TableConfig { size: 1024, bucket: 4 };
        assert_eq!(cfg.size_power(), 10);
    }
}
