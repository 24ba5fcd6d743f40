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

//! AVX2 bucket search for the (by far most common) 4-wide bucket.
//!
//! We load the four packed `u64` entries of a bucket into one 256-bit
//! vector, mask off the gate bits, and compare all four lanes against the
//! search key in a single instruction. This only ever runs on a bucket of
//! exactly four entries: the table enforces `bucket <= 4` at construction
//! time, and anything narrower than four falls back to the scalar search.
//!
//! # Safety
//!
//! Every function here requires the `avx2` target feature, which the
//! caller in [`super`] guarantees via `cfg(target_feature = "avx2")`
//! dispatch rather than a runtime check — this crate is built for a
//! specific target, not shipped as a feature-detecting fat binary.

use core::arch::x86_64::*;

use crate::table::entry::MATCH_MASK;

/// Searches a 4-entry bucket for `key`, masking both sides with
/// [`MATCH_MASK`] before comparing. `bucket` must have length exactly 4.
///
/// # Safety
///
/// The caller must ensure the `avx2` target feature is available (this
/// crate only calls this function from behind `cfg(target_feature =
/// "avx2")`) and that `bucket.len() == 4`.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn search4(bucket: &[u64], key: u64) -> Option<usize> {
    debug_assert_eq!(bucket.len(), 4);

    let mask = _mm256_set1_epi64x(MATCH_MASK as i64);
    let needle = _mm256_set1_epi64x(key as i64);
    let haystack = _mm256_loadu_si256(bucket.as_ptr() as *const __m256i);
    let masked = _mm256_and_si256(haystack, mask);
    let cmp = _mm256_cmpeq_epi64(masked, needle);

    // cmpeq_epi64 sets each matching 64-bit lane to all-ones; reinterpret
    // as f64 lanes purely to use movemask_pd, which gives us one bit per
    // lane instead of one bit per byte.
    let cmp_pd = _mm256_castsi256_pd(cmp);
    let mask_bits = _mm256_movemask_pd(cmp_pd);

    if mask_bits == 0 {
        None
    } else {
        Some(mask_bits.trailing_zeros() as usize)
    }
}

#[cfg(all(test, target_feature = "avx2"))]
mod tests {
    use super::*;
    use crate::mac::MacAddr;
    use crate::table::entry::{match_key, pack};

    #[test]
    fn agrees_with_scalar_on_hit() {
        let a = MacAddr::parse("aa:bb:cc:dd:ee:ff").unwrap();
        let bucket = [0u64, pack(a, 9), 0u64, 0u64];
        let got = unsafe { search4(&bucket, match_key(a)) };
        assert_eq!(got, Some(1));
    }

    #[test]
    fn agrees_with_scalar_on_miss() {
        let a = MacAddr::parse("aa:bb:cc:dd:ee:ff").unwrap();
        let bucket = [0u64; 4];
        let got = unsafe { search4(&bucket, match_key(a)) };
        assert_eq!(got, None);
    }
}
