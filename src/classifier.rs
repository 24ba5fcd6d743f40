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

//! # Classifier front-end
//!
//! Wraps a [`Table`] with a `default_gate`, and classifies a batch of
//! frames into per-frame output gates. This is the only piece of the crate
//! a host's per-packet hot path touches.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::TableConfig;
use crate::error::Result;
use crate::iface::{Batch, FrameHeader};
use crate::mac::MacAddr;
use crate::table::Table;

/// The gate a frame is sent to when its destination MAC is unknown or when
/// a host wires a sink to this particular index; this module gives it no
/// special treatment otherwise.
pub const DROP_GATE: u16 = 0;

/// Owns the table and the default gate, and classifies batches of frames.
pub struct Classifier {
    table: Table,
    default_gate: AtomicU32,
}

impl Classifier {
    pub fn new(cfg: TableConfig) -> Result<Self> {
        Ok(Self {
            table: Table::init(cfg)?,
            default_gate: AtomicU32::new(DROP_GATE as u32),
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Reads the default gate. Relaxed ordering: a racing
    /// `set_default_gate` may or may not be observed by a given
    /// `process_batch` call, and either outcome is acceptable.
    pub fn default_gate(&self) -> u16 {
        self.default_gate.load(Ordering::Relaxed) as u16
    }

    pub fn set_default_gate(&self, gate: u16) {
        self.default_gate.store(gate as u32, Ordering::Relaxed);
        log::debug!("default gate set to {gate}");
    }

    /// Classifies every frame in `batch`, returning one output gate per
    /// frame in order. A frame whose destination MAC isn't in the table
    /// gets the default gate; this never logs, since it runs once per
    /// packet rather than once per control-plane call.
    pub fn process_batch<F: FrameHeader>(&self, batch: &Batch<'_, F>) -> Vec<u16> {
        let default_gate = self.default_gate();
        batch
            .frames()
            .iter()
            .map(|frame| {
                let addr = MacAddr::from_octets(frame.dst_mac_octets());
                self.table.find(addr).unwrap_or(default_gate)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestFrame(MacAddr);

    impl FrameHeader for TestFrame {
        fn dst_mac_octets(&self) -> [u8; 6] {
            self.0.octets()
        }
    }

    #[test]
    fn unknown_mac_gets_default_gate() {
        let c = Classifier::new(TableConfig { size: 4, bucket: 4 }).unwrap();
        c.set_default_gate(9);
        let addr = MacAddr::parse("aa:bb:cc:dd:ee:ff").unwrap();
        let frames = [TestFrame(addr)];
        let batch = Batch::new(&frames);
        assert_eq!(c.process_batch(&batch), vec![9]);
    }

    #[test]
    fn known_mac_gets_its_gate() {
        let c = Classifier::new(TableConfig { size: 4, bucket: 4 }).unwrap();
        let addr = MacAddr::parse("aa:bb:cc:dd:ee:ff").unwrap();
        c.table().add(addr, 3).unwrap();
        let frames = [TestFrame(addr)];
        let batch = Batch::new(&frames);
        assert_eq!(c.process_batch(&batch), vec![3]);
    }

    #[test]
    fn default_gate_starts_at_drop_gate() {
        let c = Classifier::new(TableConfig::default()).unwrap();
        assert_eq!(c.default_gate(), DROP_GATE);
    }
}
