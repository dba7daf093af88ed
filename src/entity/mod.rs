//! Entities of the blog schema.
//!
//! ```text
//! user 1───* post 1───* comment *───1 user
//!              *
//!              │ post_tag
//!              *
//!             tag
//! ```

pub mod comment;
pub mod post;
pub mod post_tag;
pub mod prelude;
pub mod tag;
pub mod user;

use sea_orm::{prelude::DateTimeUtc, ActiveValue};

/// Fill `created_at` with the current time unless the caller chose one.
pub(crate) fn stamp_created_at(value: &mut ActiveValue<DateTimeUtc>) {
    if value.is_not_set() {
        *value = ActiveValue::Set(chrono::Utc::now());
    }
}
