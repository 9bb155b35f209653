// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use prefill::{Anonymous, Dispatcher, Entity, Registry};

#[derive(Entity)]
pub struct Setting {
    pub key:   String,
    pub value: String
}

fn main() {
    let dispatcher = Dispatcher::new(Registry::standard(), Anonymous);
    let mut setting = Setting {
        key:   "theme".into(),
        value: "dark".into()
    };

    let report = dispatcher.before_first_write(&mut setting).unwrap();
    assert!(report.is_empty());
    assert!(report.untouched().is_empty());
}
