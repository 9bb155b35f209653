// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use prefill::{CreatedBy, DeleteFlag, Dispatcher, Entity, FixedIdentity, Registry, UpdatedBy};

#[derive(Entity, Debug, Default)]
pub struct Invoice {
    pub number: String,

    #[soft_delete]
    pub deleted: Option<i32>,

    #[created_by]
    pub created_by: Option<String>,

    #[updated_by]
    pub updated_by: Option<String>
}

fn main() {
    let dispatcher = Dispatcher::new(Registry::standard(), FixedIdentity::new("alice"));

    let mut invoice = Invoice {
        number: "INV-1".into(),
        ..Invoice::default()
    };
    let report = dispatcher.before_first_write(&mut invoice).unwrap();

    assert!(report.was_filled::<DeleteFlag>());
    assert!(report.was_filled::<CreatedBy>());
    assert!(report.was_filled::<UpdatedBy>());
    assert_eq!(invoice.deleted, Some(0));
    assert_eq!(invoice.created_by.as_deref(), Some("alice"));
    assert_eq!(invoice.number, "INV-1");
}
