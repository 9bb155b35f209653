// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use prefill::{Anonymous, Capability, Dispatcher, Entity, Registry, from_fn};

pub struct TenantId;

impl Capability for TenantId {
    type Value = String;
    const NAME: &'static str = "tenant_id";
}

#[derive(Entity, Default)]
pub struct Document {
    #[capability(TenantId)]
    pub tenant: Option<String>,

    #[soft_delete]
    pub deleted: Option<i32>
}

fn main() {
    let registry = Registry::builder()
        .register::<TenantId>(from_fn::<TenantId, _>(|_| Ok("acme".to_string())))
        .unwrap()
        .build();
    let dispatcher = Dispatcher::new(registry, Anonymous);

    let mut doc = Document::default();
    dispatcher.before_first_write(&mut doc).unwrap();

    assert_eq!(doc.tenant.as_deref(), Some("acme"));
    // no policy registered for the delete flag
    assert_eq!(doc.deleted, None);
}
