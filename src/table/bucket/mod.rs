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

//! # Bucket search dispatch
//!
//! Picks the AVX2 path at compile time when the bucket is exactly 4 wide
//! and the target supports it, and falls back to the scalar search
//! everywhere else. Both paths must agree bit-for-bit; the scalar path is
//! also used directly wherever an operation needs a slot offset it can
//! reuse for a second purpose (see `delete` in [`super::engine`]), since
//! the SIMD path only returns a boolean-ish match position.

mod generic;

/// The plain scalar search, exposed directly for callers that need the
/// matched offset for a second purpose within the same scan (delete does;
/// the dispatched SIMD path only ever needs to answer hit-or-miss).
pub(crate) use generic::search as search_scalar;

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx2")] {
        mod avx2;

        /// Searches `bucket` for `key`, using AVX2 when the bucket is
        /// exactly 4 wide and falling back to the scalar search otherwise.
        pub(crate) fn search(bucket: &[u64], key: u64) -> Option<usize> {
            if bucket.len() == 4 {
                // SAFETY: this module is only compiled when the `avx2`
                // target feature is enabled, and the length is checked.
                unsafe { avx2::search4(bucket, key) }
            } else {
                generic::search(bucket, key)
            }
        }
    } else {
        pub(crate) fn search(bucket: &[u64], key: u64) -> Option<usize> {
            generic::search(bucket, key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mac::MacAddr;
    use crate::table::entry::{match_key, pack};

    #[test]
    fn dispatch_matches_generic_on_width_4() {
        let a = MacAddr::parse("12:34:56:78:9a:bc").unwrap();
        let bucket = [pack(a, 3), 0, 0, 0];
        assert_eq!(search(&bucket, match_key(a)), generic::search(&bucket, match_key(a)));
    }

    #[test]
    fn dispatch_works_on_narrower_buckets() {
        let a = MacAddr::parse("12:34:56:78:9a:bc").unwrap();
        let bucket = [0, pack(a, 3)];
        assert_eq!(search(&bucket, match_key(a)), Some(1));
    }
}
