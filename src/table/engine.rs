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

//! # Table engine
//!
//! The cuckoo table itself: a flat array of packed entries behind a single
//! [`parking_lot::RwLock`], grouped into `size` buckets of `bucket` slots
//! each. `find` takes a read guard; `add`/`delete`/`flush` take a write
//! guard for the whole mutation, which is what keeps a concurrent reader
//! from ever observing a torn displacement.

use parking_lot::RwLock;

use crate::config::TableConfig;
use crate::error::{Error, Result};
use crate::mac::MacAddr;
use crate::table::{bucket, entry, hash};

struct Inner {
    entries: Vec<u64>,
    count: u64,
}

/// A cuckoo-hashed MAC-to-gate table.
pub struct Table {
    inner: RwLock<Inner>,
    size: u32,
    bucket: u8,
    size_power: u32,
}

fn bucket_range(size: u32, bucket: u8, index: u32) -> std::ops::Range<usize> {
    let b = bucket as usize;
    let start = index as usize * b;
    start..start + b
}

impl Table {
    /// Allocates a new table per `cfg`, zeroed (every slot starts empty).
    pub fn init(cfg: TableConfig) -> Result<Self> {
        cfg.validate()?;
        let total = cfg.size as usize * cfg.bucket as usize;

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(total)
            .map_err(|_| Error::OutOfMemory)?;
        entries.resize(total, entry::EMPTY);

        log::info!(
            "table initialized: size={} bucket={} capacity={}",
            cfg.size,
            cfg.bucket,
            total
        );

        Ok(Self {
            inner: RwLock::new(Inner { entries, count: 0 }),
            size: cfg.size,
            bucket: cfg.bucket,
            size_power: cfg.size_power(),
        })
    }

    /// Releases the table's storage. Kept as an explicit call (rather than
    /// relying only on `Drop`) for parity with the rest of the control
    /// surface; in practice it never fails, since a `Table` that exists at
    /// all is always well-formed.
    pub fn deinit(self) -> Result<()> {
        log::info!("table deinitialized");
        drop(self);
        Ok(())
    }

    /// Number of occupied slots. Not authoritative after a sequence of
    /// adds that triggered the displacement quirk documented on [`Self::add`];
    /// see there for detail.
    pub fn len(&self) -> u64 {
        self.inner.read().count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn primary_and_alt(&self, addr: MacAddr) -> (u32, u32) {
        let h = hash::hash(addr);
        let primary = hash::primary_index(h, self.size);
        let alt = hash::alternate_index(h, self.size_power, primary);
        (primary, alt)
    }

    /// Looks up `addr`'s gate: primary bucket first, then alternate.
    pub fn find(&self, addr: MacAddr) -> Result<u16> {
        let (primary, alt) = self.primary_and_alt(addr);
        let key = entry::match_key(addr);
        let guard = self.inner.read();

        let primary_range = bucket_range(self.size, self.bucket, primary);
        if let Some(slot) = bucket::search(&guard.entries[primary_range.clone()], key) {
            return Ok(entry::gate_of(guard.entries[primary_range.start + slot]));
        }

        let alt_range = bucket_range(self.size, self.bucket, alt);
        if let Some(slot) = bucket::search(&guard.entries[alt_range.clone()], key) {
            return Ok(entry::gate_of(guard.entries[alt_range.start + slot]));
        }

        Err(Error::not_found(addr))
    }

    /// Inserts `addr -> gate`.
    ///
    /// Fails with [`Error::AlreadyExists`] if `addr` is already present in
    /// either its primary or alternate bucket. Otherwise:
    ///
    /// 1. If the primary bucket has a free slot, the entry goes there.
    /// 2. Otherwise, walk the primary bucket's residents in slot order,
    ///    trying to relocate each one into its own alternate bucket. The
    ///    walk stops at the first resident whose relocation would be
    ///    pointless (its alternate bucket collapses onto itself, or onto
    ///    the bucket we're inserting into) rather than skipping past it —
    ///    a single bad candidate ends the whole attempt, even if a later
    ///    resident in the same bucket would have relocated cleanly. This
    ///    mirrors a real constraint of the table's single-level
    ///    displacement design, not an oversight to special-case away.
    ///
    ///    When a relocation does succeed, the new entry is always written
    ///    to primary-bucket slot 0 — not to whichever slot the relocated
    ///    resident actually vacated. If that slot wasn't the one just
    ///    freed, its previous occupant is silently overwritten rather than
    ///    displaced. This is a frozen quirk of the displacement algorithm,
    ///    not something this implementation papers over; see the design
    ///    notes for why it's kept rather than fixed.
    /// 3. If no relocation succeeds, fail with [`Error::OutOfSpace`].
    pub fn add(&self, addr: MacAddr, gate: u16) -> Result<()> {
        let (primary, alt) = self.primary_and_alt(addr);
        let key = entry::match_key(addr);
        let b = self.bucket as usize;
        let mut guard = self.inner.write();

        let primary_range = bucket_range(self.size, self.bucket, primary);
        let alt_range = bucket_range(self.size, self.bucket, alt);
        if bucket::search(&guard.entries[primary_range.clone()], key).is_some()
            || bucket::search(&guard.entries[alt_range], key).is_some()
        {
            log::warn!("add failed, MAC address '{addr}' already exists");
            return Err(Error::already_exists(addr));
        }

        for k in 0..b {
            let offset = primary_range.start + k;
            if !entry::is_occupied(guard.entries[offset]) {
                guard.entries[offset] = entry::pack(addr, gate);
                guard.count += 1;
                log::debug!("added '{addr}' -> gate {gate} at primary slot {k}");
                return Ok(());
            }
        }

        for k in 0..b {
            let offset1 = primary_range.start + k;
            let resident = guard.entries[offset1];
            let r_addr = entry::addr_of(resident);
            let r_hash = hash::hash(r_addr);
            let r_primary = hash::primary_index(r_hash, self.size);
            let r_alt = hash::alternate_index(r_hash, self.size_power, r_primary);

            if r_primary == r_alt || primary == r_alt {
                break;
            }

            let r_alt_range = bucket_range(self.size, self.bucket, r_alt);
            if let Some(free) = (0..b).find(|&j| !entry::is_occupied(guard.entries[r_alt_range.start + j]))
            {
                let offset2 = r_alt_range.start + free;
                guard.entries[offset2] = resident;
                guard.entries[offset1] = entry::EMPTY;
                guard.entries[primary_range.start] = entry::pack(addr, gate);
                guard.count += 1;
                log::trace!(
                    "displaced resident at primary slot {k} into alternate bucket {r_alt} slot {free}"
                );
                log::debug!("added '{addr}' -> gate {gate} via displacement");
                return Ok(());
            }
        }

        log::warn!("add failed, no free slot for MAC address '{addr}'");
        Err(Error::out_of_space(addr))
    }

    /// Removes `addr`. Uses the scalar bucket scan directly (rather than
    /// the dispatched search) because it needs the matched slot's absolute
    /// offset to clear it, and the SIMD path only reports hit-or-miss plus
    /// an in-bucket slot index — which is already enough here, but the
    /// control plane is not the hot path, so there is no reason to prefer
    /// the SIMD path over the simpler one.
    pub fn delete(&self, addr: MacAddr) -> Result<()> {
        let (primary, alt) = self.primary_and_alt(addr);
        let key = entry::match_key(addr);
        let mut guard = self.inner.write();

        let primary_range = bucket_range(self.size, self.bucket, primary);
        if let Some(slot) = bucket::search_scalar(&guard.entries[primary_range.clone()], key) {
            let offset = primary_range.start + slot;
            guard.entries[offset] = entry::EMPTY;
            guard.count -= 1;
            log::debug!("deleted '{addr}'");
            return Ok(());
        }

        let alt_range = bucket_range(self.size, self.bucket, alt);
        if let Some(slot) = bucket::search_scalar(&guard.entries[alt_range.clone()], key) {
            let offset = alt_range.start + slot;
            guard.entries[offset] = entry::EMPTY;
            guard.count -= 1;
            log::debug!("deleted '{addr}'");
            return Ok(());
        }

        log::warn!("delete failed, MAC address '{addr}' does not exist");
        Err(Error::not_found(addr))
    }

    /// Clears every slot and resets the occupancy count to zero.
    pub fn flush(&self) {
        let mut guard = self.inner.write();
        guard.entries.iter_mut().for_each(|e| *e = entry::EMPTY);
        guard.count = 0;
        log::info!("table flushed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> Table {
        Table::init(TableConfig { size: 4, bucket: 4 }).unwrap()
    }

    #[test]
    fn add_then_find_roundtrip() {
        let t = small_table();
        let a = MacAddr::parse("aa:bb:cc:dd:ee:ff").unwrap();
        t.add(a, 7).unwrap();
        assert_eq!(t.find(a).unwrap(), 7);
    }

    #[test]
    fn add_duplicate_fails() {
        let t = small_table();
        let a = MacAddr::parse("aa:bb:cc:dd:ee:ff").unwrap();
        t.add(a, 1).unwrap();
        assert!(matches!(t.add(a, 2), Err(Error::AlreadyExists(_))));
    }

    #[test]
    fn find_missing_fails() {
        let t = small_table();
        let a = MacAddr::parse("aa:bb:cc:dd:ee:ff").unwrap();
        assert!(matches!(t.find(a), Err(Error::NotFound(_))));
    }

    #[test]
    fn delete_removes_entry() {
        let t = small_table();
        let a = MacAddr::parse("aa:bb:cc:dd:ee:ff").unwrap();
        t.add(a, 1).unwrap();
        t.delete(a).unwrap();
        assert!(t.find(a).is_err());
    }

    #[test]
    fn delete_missing_fails() {
        let t = small_table();
        let a = MacAddr::parse("aa:bb:cc:dd:ee:ff").unwrap();
        assert!(matches!(t.delete(a), Err(Error::NotFound(_))));
    }

    #[test]
    fn flush_clears_all_entries() {
        let t = small_table();
        for i in 0u8..4 {
            let a = MacAddr::from_octets([0, 0, 0, 0, 0, i]);
            t.add(a, i as u16).unwrap();
        }
        assert_eq!(t.len(), 4);
        t.flush();
        assert_eq!(t.len(), 0);
        for i in 0u8..4 {
            let a = MacAddr::from_octets([0, 0, 0, 0, 0, i]);
            assert!(t.find(a).is_err());
        }
    }

    #[test]
    fn fills_full_bucket_capacity() {
        // size=1 collapses every address into bucket 0; exactly `bucket`
        // entries should fit before the table reports out of space.
        let t = Table::init(TableConfig { size: 1, bucket: 4 }).unwrap();
        for i in 0u8..4 {
            let a = MacAddr::from_octets([0, 0, 0, 0, 0, i]);
            t.add(a, i as u16).unwrap();
        }
        let overflow = MacAddr::from_octets([0, 0, 0, 0, 0, 99]);
        assert!(matches!(t.add(overflow, 0), Err(Error::OutOfSpace(_))));
    }
}
