// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![allow(dead_code)]

use prefill::Entity;

#[derive(Entity)]
pub struct Post {
    #[created_by]
    pub author: Option<String>,

    #[created_by]
    pub owner: Option<String>
}

fn main() {}
