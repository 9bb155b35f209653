// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg(feature = "chrono")]

use chrono::{DateTime, TimeZone, Utc};
use prefill::{CreatedAt, Dispatcher, Entity, FixedIdentity, Now, Registry, UpdatedAt};

#[derive(Entity, Debug, Default)]
struct Note {
    #[created_by]
    author:     Option<String>,
    #[created_at]
    created_at: Option<DateTime<Utc>>,
    #[updated_at]
    updated_at: Option<DateTime<Utc>>
}

fn fixed() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn standard_registry_stamps_times() {
    let before = Utc::now();
    let dispatcher = Dispatcher::new(Registry::standard(), FixedIdentity::new("alice"));

    let mut note = Note::default();
    dispatcher.before_first_write(&mut note).unwrap();

    let created = note.created_at.unwrap();
    assert!(created >= before);
    assert!(note.updated_at.is_some());
    assert_eq!(note.author.as_deref(), Some("alice"));
}

#[test]
fn custom_clock() {
    let registry = Registry::builder()
        .register::<CreatedAt>(Now::with_clock(fixed))
        .unwrap()
        .register::<UpdatedAt>(Now::with_clock(fixed))
        .unwrap()
        .build();
    let dispatcher = Dispatcher::new(registry, FixedIdentity::new("alice"));

    let mut note = Note::default();
    let report = dispatcher.before_first_write(&mut note).unwrap();

    assert_eq!(note.created_at, Some(fixed()));
    assert_eq!(note.updated_at, Some(fixed()));
    assert!(report.was_filled::<CreatedAt>());
    assert_eq!(note.author, None);
}

#[test]
fn preset_timestamp_is_kept() {
    let dispatcher = Dispatcher::new(Registry::standard(), FixedIdentity::new("alice"));
    let mut note = Note {
        created_at: Some(fixed()),
        ..Note::default()
    };

    dispatcher.before_first_write(&mut note).unwrap();

    assert_eq!(note.created_at, Some(fixed()));
}
