// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use prefill::{Capability, CreatedBy, DeleteFlag, Entity, HasCapability};

#[derive(Entity, Default)]
pub struct Comment {
    #[soft_delete]
    pub deleted: Option<i32>,

    #[created_by]
    pub author: Option<String>
}

fn assert_soft_deletable<T: HasCapability<DeleteFlag>>(_: &T) {}

fn main() {
    let mut comment = Comment::default();
    assert_soft_deletable(&comment);

    assert!(CreatedBy::get(&comment).is_none());
    CreatedBy::set(&mut comment, "dana".into());
    assert_eq!(CreatedBy::get(&comment).map(String::as_str), Some("dana"));

    DeleteFlag::set(&mut comment, 1);
    assert_eq!(comment.deleted, Some(1));

    assert!(comment.implements(CreatedBy::id()));
}
