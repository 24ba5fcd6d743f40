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

//! # MAC addresses
//!
//! A 48-bit Ethernet MAC address, stored canonically as a little-endian
//! load of its six octets into the low 48 bits of a `u64` (byte 0 is the
//! least-significant byte). This is the representation the hash and entry
//! codec operate on everywhere except inside [`populate`](crate::control)'s
//! sequential address generator, which walks addresses as a big-endian
//! 48-bit integer to get a human-sensible "next address" ordering.

use crate::error::{Error, Result};
use std::fmt;

/// A 48-bit Ethernet MAC address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddr(u64);

const MASK48: u64 = (1u64 << 48) - 1;

impl MacAddr {
    /// Builds a `MacAddr` from six octets in network order (`octets[0]` is
    /// transmitted first), producing the canonical little-endian-load form.
    pub fn from_octets(octets: [u8; 6]) -> Self {
        let mut buf = [0u8; 8];
        buf[..6].copy_from_slice(&octets);
        Self(u64::from_le_bytes(buf) & MASK48)
    }

    /// Returns the six octets in network order.
    pub fn octets(self) -> [u8; 6] {
        let buf = self.0.to_le_bytes();
        [buf[0], buf[1], buf[2], buf[3], buf[4], buf[5]]
    }

    /// Wraps a raw canonical (little-endian-load) 48-bit value. Bits above
    /// 48 are masked away.
    pub fn from_canonical_u64(v: u64) -> Self {
        Self(v & MASK48)
    }

    /// Returns the raw canonical (little-endian-load) 48-bit value.
    pub fn as_canonical_u64(self) -> u64 {
        self.0
    }

    /// Interprets this address as a big-endian 48-bit integer for
    /// sequential generation, and returns the address `self + n` under
    /// that big-endian ordering. Used only by `populate`.
    pub fn big_endian_add(self, n: u64) -> Self {
        let be = self.0.swap_bytes() >> 16;
        let next = be.wrapping_add(n) & MASK48;
        Self((next << 16).swap_bytes())
    }

    /// Parses the conventional colon-hex form, e.g. `"aa:bb:cc:dd:ee:ff"`.
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(Error::invalid(format!(
                "'{s}' is not a 6-octet colon-hex MAC address"
            )));
        }
        let mut octets = [0u8; 6];
        for (i, p) in parts.iter().enumerate() {
            octets[i] = u8::from_str_radix(p, 16)
                .map_err(|_| Error::invalid(format!("'{s}' has a malformed octet '{p}'")))?;
        }
        Ok(Self::from_octets(octets))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.octets();
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_octets() {
        let o = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
        let m = MacAddr::from_octets(o);
        assert_eq!(m.octets(), o);
    }

    #[test]
    fn canonical_is_little_endian_load() {
        let m = MacAddr::from_octets([0xff, 0, 0, 0, 0, 0]);
        assert_eq!(m.as_canonical_u64(), 0xff);
    }

    #[test]
    fn parse_and_display_roundtrip() {
        let s = "aa:bb:cc:dd:ee:ff";
        let m = MacAddr::parse(s).unwrap();
        assert_eq!(m.to_string(), s);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(MacAddr::parse("not-a-mac").is_err());
        assert!(MacAddr::parse("aa:bb:cc:dd:ee").is_err());
    }

    #[test]
    fn big_endian_add_sequential() {
        let base = MacAddr::parse("00:00:00:00:00:00").unwrap();
        let next = base.big_endian_add(1);
        assert_eq!(next.to_string(), "00:00:00:00:00:01");
        let wrap = base.big_endian_add(256);
        assert_eq!(wrap.to_string(), "00:00:00:00:01:00");
    }
}
