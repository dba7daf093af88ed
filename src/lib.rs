#![deny(
    missing_debug_implementations,
    clippy::print_stderr,
    clippy::print_stdout
)]

//! # SeaORM Blog
//!
//! A blog schema (users, posts, comments, tags) on [SeaORM](https://www.sea-ql.org/SeaORM),
//! with a graded set of query drills and the aggregate metrics they build up to.
//!
//! ## Modules
//!
//! 1. [`entity`]: the five entities and their relations
//! 2. [`schema`]: create, drop and clear the tables
//! 3. [`query`]: one function per challenge, levels 1 to 8
//! 4. [`metrics`]: per user, post and tag metrics computed in memory
//! 5. [`seed`]: the demo data set
//! 6. [`factory`]: builders for test data
//!
//! ## A quick taste
//!
//! ```ignore
//! use sea_orm_blog::{query, schema, seed, Config};
//!
//! let db = Config::load()?.connect().await?;
//! schema::create_tables(&db).await?;
//! seed::run(&db).await?;
//!
//! for user in query::users_by_post_count(&db).await? {
//!     println!("{} wrote {} posts", user.name, user.post_count);
//! }
//! let john = query::user_statistics(&db).await?;
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod factory;
pub mod metrics;
pub mod query;
pub mod schema;
pub mod seed;

pub use config::*;
pub use error::*;
pub use metrics::{
    Classification, Dataset, MetricsReport, PostMetrics, Role, TagUsage, UserMetrics,
};
