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

//! # Hashing and bucket indexing
//!
//! The table hashes a MAC with a zero-seeded CRC-32C and derives two
//! candidate bucket indices from that one hash: a primary index over the
//! whole table, and an alternate index restricted to the table's lower
//! half. The restriction is deliberate and is not a bug: it is what makes
//! the alternate index cheap to compute from a tag derived from the same
//! hash, at the cost of using only half the table as eviction targets.

use crate::mac::MacAddr;

/// CRC-32C (Castagnoli) with a zero seed and no output XOR, matching a
/// hardware `crc32` instruction invoked with an initial value of zero.
/// The standard iSCSI profile XORs in and out with `0xffff_ffff`; this
/// table does not, so the algorithm is defined from scratch here rather
/// than reused from `crc::CRC_32_ISCSI`.
const ZERO_SEED_CRC32C: crc::Algorithm<u32> = crc::Algorithm {
    width: 32,
    poly: 0x1edc6f41,
    init: 0,
    refin: true,
    refout: true,
    xorout: 0,
    check: 0,
    residue: 0,
};

const CRC: crc::Crc<u32> = crc::Crc::<u32>::new(&ZERO_SEED_CRC32C);

/// Hashes a MAC address with the zero-seeded CRC-32C variant. The hash is
/// taken over all 8 bytes of the little-endian 64-bit word (the 48-bit
/// address zero-extended into the top two bytes), matching a hardware
/// `crc32` instruction applied to the whole word rather than just its
/// 6 significant bytes.
pub(crate) fn hash(addr: MacAddr) -> u32 {
    CRC.checksum(&addr.as_canonical_u64().to_le_bytes())
}

/// The primary bucket index: `hash` taken modulo the table size. `size`
/// must be a power of two.
pub(crate) fn primary_index(hash: u32, size: u32) -> u32 {
    hash & (size - 1)
}

/// The alternate bucket index: an independent-looking index derived by
/// mixing a tag taken from the unused high bits of `hash` with the
/// primary index, restricted to `[0, size / 2)`.
///
/// `size_power` is `log2(size)`. A one-bucket-wide table (`size_power == 0`)
/// has no "lower half" to restrict to, so the alternate index is simply 0.
pub(crate) fn alternate_index(hash: u32, size_power: u32, index: u32) -> u32 {
    if size_power == 0 {
        return 0;
    }
    let tag = ((hash >> size_power) as u64 + 1).wrapping_mul(0x5bd1_e995);
    ((index as u64 ^ tag) & ((1u64 << (size_power - 1)) - 1)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_index_within_bounds() {
        let m = MacAddr::parse("aa:bb:cc:dd:ee:ff").unwrap();
        let h = hash(m);
        assert!(primary_index(h, 1024) < 1024);
    }

    #[test]
    fn alternate_index_within_lower_half() {
        let m = MacAddr::parse("aa:bb:cc:dd:ee:ff").unwrap();
        let h = hash(m);
        let p = primary_index(h, 1024);
        let a = alternate_index(h, 10, p);
        assert!(a < 512);
    }

    #[test]
    fn single_bucket_table_has_alternate_zero() {
        assert_eq!(alternate_index(0xdead_beef, 0, 0), 0);
    }

    #[test]
    fn hash_is_deterministic() {
        let m = MacAddr::parse("00:11:22:33:44:55").unwrap();
        assert_eq!(hash(m), hash(m));
    }

    #[test]
    fn distinct_macs_usually_hash_differently() {
        let a = MacAddr::parse("00:00:00:00:00:01").unwrap();
        let b = MacAddr::parse("00:00:00:00:00:02").unwrap();
        assert_ne!(hash(a), hash(b));
    }
}
