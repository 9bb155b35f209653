// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use prefill::{Dispatcher, Entity, FixedIdentity, Registry};

#[derive(Entity)]
pub struct Envelope<T>
where
    T: Clone
{
    pub payload: T,

    #[created_by]
    pub sender: Option<String>
}

fn main() {
    let dispatcher = Dispatcher::new(Registry::standard(), FixedIdentity::new("mailer"));

    let mut envelope = Envelope {
        payload: vec![1u8, 2, 3],
        sender:  None
    };
    dispatcher.before_first_write(&mut envelope).unwrap();

    assert_eq!(envelope.sender.as_deref(), Some("mailer"));
    assert_eq!(envelope.payload, [1, 2, 3]);
}
