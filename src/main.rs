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

//! `l2fwdctl`: a tiny standalone harness around the `l2fwd` library.
//!
//! A real deployment embeds the library inside a host dataplane process
//! and feeds it commands over that host's own RPC transport. This binary
//! exists to exercise the control surface end to end from the command
//! line: it owns one [`Classifier`], reads newline-delimited commands from
//! stdin on a worker task, and applies them against the classifier running
//! on the current thread.

use std::collections::BTreeMap;
use std::env;
use std::io::BufRead;

use l2fwd::control;
use l2fwd::iface::CommandArg;
use l2fwd::{Classifier, TableConfig};

fn init_logger() {
    let mut builder = env_logger::Builder::new();
    match env::var("L2FWD_LOG") {
        Ok(filter) => {
            builder.parse_filters(&filter);
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Info);
        }
    }
    builder.init();
}

/// Parses one line of the form `<cmd> <space-separated args>` into a
/// command name plus a [`CommandArg`]. This is a minimal line protocol for
/// the demo binary, not a stand-in for any real RPC wire format.
fn parse_line(line: &str) -> Option<(String, CommandArg)> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next()?.to_string();
    let rest: Vec<&str> = parts.collect();

    let arg = match cmd.as_str() {
        "add" if rest.len() == 2 => {
            let mut m = BTreeMap::new();
            m.insert("addr".into(), CommandArg::Str(rest[0].into()));
            m.insert("gate".into(), CommandArg::Int(rest[1].parse().ok()?));
            CommandArg::List(vec![CommandArg::Map(m)])
        }
        "delete" | "lookup" if !rest.is_empty() => {
            CommandArg::List(rest.iter().map(|s| CommandArg::Str((*s).into())).collect())
        }
        "set_default_gate" if rest.len() == 1 => CommandArg::Int(rest[0].parse().ok()?),
        "populate" if rest.len() == 3 => {
            let mut m = BTreeMap::new();
            m.insert("base".into(), CommandArg::Str(rest[0].into()));
            m.insert("count".into(), CommandArg::Int(rest[1].parse().ok()?));
            m.insert("gate_count".into(), CommandArg::Int(rest[2].parse().ok()?));
            CommandArg::Map(m)
        }
        _ => return None,
    };

    Some((cmd, arg))
}

fn dispatch(classifier: &Classifier, cmd: &str, arg: &CommandArg) {
    let result = match cmd {
        "add" => control::add(classifier, arg),
        "delete" => control::delete(classifier, arg),
        "set_default_gate" => control::set_default_gate(classifier, arg),
        "populate" => control::populate(classifier, arg),
        "lookup" => control::lookup(classifier, arg).map(|gates| {
            println!("{gates:?}");
        }),
        _ => unreachable!("parse_line only returns known commands"),
    };

    if let Err(e) = result {
        log::warn!("command '{cmd}' failed: {e}");
        eprintln!("error: {e}");
    }
}

fn main() {
    init_logger();

    let classifier = Classifier::new(TableConfig::default()).expect("table init");
    log::info!("l2fwdctl ready, reading commands from stdin");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .build()
        .expect("failed to start the tokio runtime");

    runtime.block_on(async {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();

        let reader = tokio::task::spawn_blocking(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        while let Some(line) = rx.recv().await {
            match parse_line(&line) {
                Some((cmd, arg)) => dispatch(&classifier, &cmd, &arg),
                None => eprintln!("unrecognized command: {line}"),
            }
        }

        let _ = reader.await;
    });
}
