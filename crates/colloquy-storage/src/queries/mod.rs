// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for CRUD operations on storage entities.

pub mod books;
pub mod clubs;
pub mod messages;
pub mod progress;
pub mod users;
