//! Builders for test data.
//!
//! A [`Factory`] hands out one builder per entity. Every builder has three
//! strategies:
//!
//! - `build()`: an unsaved `ActiveModel`, no database access
//! - `build_stubbed_list(n)`: `Model`s with made-up ids, no database access
//! - `create(db)` / `create_list(db, n)`: insert, then create whatever the
//!   builder was asked to attach (posts of a user, comments of a post, ...)
//!
//! Missing references are created on the fly, existing ones are checked
//! before insertion.
//!
//! ```ignore
//! let factory = Factory::new();
//! let john = factory.user().john_doe().create(db).await?;
//! let post = factory.post().ruby_post().author(&john).popular().create(db).await?;
//! ```

mod comment;
pub mod fake;
mod post;
mod post_tag;
mod scenario;
mod tag;
mod user;

pub use comment::{CommentBuilder, CommentContext};
pub use post::PostBuilder;
pub use post_tag::PostTagBuilder;
pub use scenario::*;
pub use tag::TagBuilder;
pub use user::UserBuilder;

use crate::{entity::post_tag as post_tag_entity, BlogErr};
use rand::{rngs::StdRng, SeedableRng};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PrimaryKeyTrait, Set,
};
use std::sync::{
    atomic::{AtomicI32, AtomicU32, Ordering},
    Mutex, PoisonError,
};

/// Sequences and randomness shared by all builders
#[derive(Debug)]
pub struct Factory {
    email: AtomicU32,
    title: AtomicU32,
    tag_name: AtomicU32,
    stub_id: AtomicI32,
    rng: Mutex<StdRng>,
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

impl Factory {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same seed, same fake names and text
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            email: AtomicU32::new(0),
            title: AtomicU32::new(0),
            tag_name: AtomicU32::new(0),
            stub_id: AtomicI32::new(1000),
            rng: Mutex::new(rng),
        }
    }

    pub fn user(&self) -> UserBuilder<'_> {
        UserBuilder::new(self)
    }

    pub fn post(&self) -> PostBuilder<'_> {
        PostBuilder::new(self)
    }

    pub fn comment(&self) -> CommentBuilder<'_> {
        CommentBuilder::new(self)
    }

    pub fn tag(&self) -> TagBuilder<'_> {
        TagBuilder::new(self)
    }

    pub fn post_tag(&self) -> PostTagBuilder<'_> {
        PostTagBuilder::new(self)
    }

    /// `user{n}@example.com`
    pub fn next_email(&self) -> String {
        format!("user{}@example.com", next(&self.email))
    }

    /// `Blog Post Title {n}`
    pub fn next_title(&self) -> String {
        format!("Blog Post Title {}", next(&self.title))
    }

    /// `Tag{n}`
    pub fn next_tag_name(&self) -> String {
        format!("Tag{}", next(&self.tag_name))
    }

    pub(crate) fn next_stub_id(&self) -> i32 {
        self.stub_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn rng<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut StdRng) -> T,
    {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

fn next(seq: &AtomicU32) -> u32 {
    seq.fetch_add(1, Ordering::Relaxed) + 1
}

/// Fails with [`BlogErr::MissingReference`] unless row `id` of `E` exists
async fn ensure_exists<E, C>(db: &C, entity: &'static str, id: i32) -> Result<(), BlogErr>
where
    E: EntityTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    C: ConnectionTrait,
{
    match E::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(BlogErr::MissingReference { entity, id }),
    }
}

/// Attach tag `tag_id` to post `post_id`
async fn link<C>(db: &C, post_id: i32, tag_id: i32) -> Result<post_tag_entity::Model, BlogErr>
where
    C: ConnectionTrait,
{
    post_tag_entity::ActiveModel {
        post_id: Set(post_id),
        tag_id: Set(tag_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(BlogErr::inserting("post_tag"))
}
