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

//! # Control surface
//!
//! `add`/`delete`/`lookup`/`set_default_gate`/`populate`, each taking a
//! [`CommandArg`] shaped the way the host's RPC layer would hand it to us,
//! and returning a crate [`Result`]. These are control-plane operations:
//! every one of them logs, and none of them run on the packet hot path.

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::iface::CommandArg;
use crate::mac::MacAddr;

fn parse_mac(arg: &CommandArg) -> Result<MacAddr> {
    MacAddr::parse(arg.as_str()?)
}

/// `arg` is a list of `{"addr": "<mac>", "gate": <int>}` maps. Entries are
/// applied in order; the first failure stops processing and is returned
/// (entries before it remain applied).
pub fn add(classifier: &Classifier, arg: &CommandArg) -> Result<()> {
    for item in arg.as_list()? {
        let map = item.as_map()?;
        let addr_arg = map
            .get("addr")
            .ok_or_else(|| Error::invalid("add list item map must contain addr as a string"))?;
        let gate_arg = map
            .get("gate")
            .ok_or_else(|| Error::invalid("add list item map must contain gate as an integer"))?;

        let addr = parse_mac(addr_arg)?;
        let gate = gate_arg.as_int()?;
        let gate: u16 = gate
            .try_into()
            .map_err(|_| Error::invalid(format!("gate {gate} is out of range")))?;

        classifier.table().add(addr, gate)?;
    }
    Ok(())
}

/// `arg` is a list of MAC address strings.
pub fn delete(classifier: &Classifier, arg: &CommandArg) -> Result<()> {
    for item in arg.as_list()? {
        let addr = parse_mac(item)?;
        classifier.table().delete(addr)?;
    }
    Ok(())
}

/// `arg` is a single integer gate index.
pub fn set_default_gate(classifier: &Classifier, arg: &CommandArg) -> Result<()> {
    let gate = arg.as_int()?;
    let gate: u16 = gate
        .try_into()
        .map_err(|_| Error::invalid(format!("gate {gate} is out of range")))?;
    classifier.set_default_gate(gate);
    Ok(())
}

/// `arg` is a list of MAC address strings; returns one gate per address,
/// in order. Fails on the first address that isn't present.
pub fn lookup(classifier: &Classifier, arg: &CommandArg) -> Result<Vec<u16>> {
    let mut gates = Vec::new();
    for item in arg.as_list()? {
        let addr = parse_mac(item)?;
        gates.push(classifier.table().find(addr)?);
    }
    Ok(gates)
}

/// `arg` is a map: `base` (a MAC address string), `count`, and
/// `gate_count`. Inserts `count` sequentially generated addresses starting
/// at `base`, each assigned gate `i % gate_count`. Best-effort: a `count`
/// large enough to exhaust the table simply stops adding once every
/// subsequent insert fails, without surfacing that as an error to the
/// caller.
pub fn populate(classifier: &Classifier, arg: &CommandArg) -> Result<()> {
    let map = arg.as_map()?;
    let base_str = map
        .get("base")
        .ok_or_else(|| Error::invalid("base must exist in gen, and must be string"))?
        .as_str()?;
    let base = MacAddr::parse(base_str)?;

    let count = map
        .get("count")
        .ok_or_else(|| Error::invalid("count must exist in gen, and must be int"))?
        .as_int()?;
    let gate_count = map
        .get("gate_count")
        .ok_or_else(|| Error::invalid("gate_count must exist in gen, and must be int"))?
        .as_int()?;

    if gate_count <= 0 {
        return Err(Error::invalid("gate_count must be positive"));
    }

    for i in 0..count {
        let addr = base.big_endian_add(i as u64);
        let gate = (i % gate_count) as u16;
        // Individual failures (duplicate/out-of-space) are expected once
        // the table fills up; populate is a bulk convenience, not a
        // transaction, so it keeps going rather than aborting the batch.
        let _ = classifier.table().add(addr, gate);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use std::collections::BTreeMap;

    fn classifier() -> Classifier {
        Classifier::new(TableConfig { size: 4, bucket: 4 }).unwrap()
    }

    fn add_item(addr: &str, gate: i64) -> CommandArg {
        let mut m = BTreeMap::new();
        m.insert("addr".into(), CommandArg::Str(addr.into()));
        m.insert("gate".into(), CommandArg::Int(gate));
        CommandArg::Map(m)
    }

    #[test]
    fn add_then_lookup() {
        let c = classifier();
        let arg = CommandArg::List(vec![add_item("aa:bb:cc:dd:ee:ff", 5)]);
        add(&c, &arg).unwrap();

        let lookup_arg = CommandArg::List(vec![CommandArg::Str("aa:bb:cc:dd:ee:ff".into())]);
        assert_eq!(lookup(&c, &lookup_arg).unwrap(), vec![5]);
    }

    #[test]
    fn add_rejects_missing_fields() {
        let c = classifier();
        let mut m = BTreeMap::new();
        m.insert("addr".into(), CommandArg::Str("aa:bb:cc:dd:ee:ff".into()));
        let arg = CommandArg::List(vec![CommandArg::Map(m)]);
        assert!(add(&c, &arg).is_err());
    }

    #[test]
    fn delete_then_lookup_fails() {
        let c = classifier();
        let arg = CommandArg::List(vec![add_item("aa:bb:cc:dd:ee:ff", 1)]);
        add(&c, &arg).unwrap();

        let del_arg = CommandArg::List(vec![CommandArg::Str("aa:bb:cc:dd:ee:ff".into())]);
        delete(&c, &del_arg).unwrap();

        let lookup_arg = CommandArg::List(vec![CommandArg::Str("aa:bb:cc:dd:ee:ff".into())]);
        assert!(lookup(&c, &lookup_arg).is_err());
    }

    #[test]
    fn set_default_gate_updates_classifier() {
        let c = classifier();
        set_default_gate(&c, &CommandArg::Int(42)).unwrap();
        assert_eq!(c.default_gate(), 42);
    }

    #[test]
    fn populate_inserts_sequential_addresses_with_rotating_gates() {
        let c = Classifier::new(TableConfig { size: 16, bucket: 4 }).unwrap();
        let mut m = BTreeMap::new();
        m.insert("base".into(), CommandArg::Str("00:00:00:00:00:00".into()));
        m.insert("count".into(), CommandArg::Int(4));
        m.insert("gate_count".into(), CommandArg::Int(2));
        let arg = CommandArg::Map(m);
        populate(&c, &arg).unwrap();

        let lookup_arg = CommandArg::List(vec![
            CommandArg::Str("00:00:00:00:00:00".into()),
            CommandArg::Str("00:00:00:00:00:01".into()),
            CommandArg::Str("00:00:00:00:00:02".into()),
            CommandArg::Str("00:00:00:00:00:03".into()),
        ]);
        assert_eq!(lookup(&c, &lookup_arg).unwrap(), vec![0, 1, 0, 1]);
    }
}
