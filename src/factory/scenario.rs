//! Whole data sets assembled from the builders.

use super::{fake, link, Factory};
use crate::{
    entity::{comment, post, prelude::*, tag, user},
    BlogErr,
};
use chrono::Utc;
use rand::{seq::SliceRandom, Rng};
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Rows per `INSERT` statement of [`bulk_data`]
const BULK_CHUNK: usize = 200;

/// What [`blog_ecosystem`] created
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlogEcosystem {
    pub admin: user::Model,
    /// Three users with three posts each
    pub writers: Vec<user::Model>,
    /// Five users with five comments each
    pub commenters: Vec<user::Model>,
    /// Ruby, Rails, JavaScript, React, Python
    pub tags: Vec<tag::Model>,
    /// Popular posts by the admin, each with two of [`Self::tags`]
    pub featured_posts: Vec<post::Model>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionThread {
    pub users_count: usize,
    pub posts_per_user: usize,
    pub comments_per_post: usize,
    pub tags_pool: usize,
}

impl Default for DiscussionThread {
    fn default() -> Self {
        Self {
            users_count: 3,
            posts_per_user: 2,
            comments_per_post: 3,
            tags_pool: 5,
        }
    }
}

/// What [`discussion_thread`] created
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Thread {
    pub users: Vec<user::Model>,
    pub tags: Vec<tag::Model>,
    pub posts: Vec<post::Model>,
    pub comments: Vec<comment::Model>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkData {
    pub users_count: usize,
    pub posts_count: usize,
    pub comments_count: usize,
}

impl Default for BulkData {
    fn default() -> Self {
        Self {
            users_count: 100,
            posts_count: 500,
            comments_count: 1000,
        }
    }
}

/// An admin with featured posts, writers, commenters and a set of
/// programming tags
#[instrument(skip_all)]
pub async fn blog_ecosystem<C>(factory: &Factory, db: &C) -> Result<BlogEcosystem, BlogErr>
where
    C: ConnectionTrait,
{
    let admin = factory
        .user()
        .name("Admin User")
        .email("admin@blog.com")
        .create(db)
        .await?;
    let writers = factory.user().with_posts(3).create_list(db, 3).await?;
    let commenters = factory.user().active_commenter().create_list(db, 5).await?;

    let mut tags = Vec::new();
    for name in ["Ruby", "Rails", "JavaScript", "React", "Python"] {
        tags.push(factory.tag().name(name).create(db).await?);
    }

    let featured_posts = factory
        .post()
        .popular()
        .author(&admin)
        .create_list(db, 3)
        .await?;
    for post in &featured_posts {
        let picked: Vec<i32> =
            factory.rng(|rng| tags.choose_multiple(rng, 2).map(|t| t.id).collect());
        for tag_id in picked {
            link(db, post.id, tag_id).await?;
        }
    }

    tracing::info!(
        writers = writers.len(),
        commenters = commenters.len(),
        featured_posts = featured_posts.len(),
        "blog ecosystem created"
    );
    Ok(BlogEcosystem {
        admin,
        writers,
        commenters,
        tags,
        featured_posts,
    })
}

/// Users writing posts and commenting on each other's posts.
///
/// Every post gets one to three tags from the pool. All comments on a post
/// come from one user picked among the others; a single user therefore gets
/// no comments.
#[instrument(skip(factory, db))]
pub async fn discussion_thread<C>(
    factory: &Factory,
    db: &C,
    params: DiscussionThread,
) -> Result<Thread, BlogErr>
where
    C: ConnectionTrait,
{
    let mut thread = Thread {
        users: factory.user().create_list(db, params.users_count).await?,
        tags: factory.tag().create_list(db, params.tags_pool).await?,
        ..Default::default()
    };

    for user in &thread.users {
        let others: Vec<&user::Model> = thread.users.iter().filter(|u| u.id != user.id).collect();
        let posts = factory
            .post()
            .author(user)
            .create_list(db, params.posts_per_user)
            .await?;

        for post in posts {
            let picked: Vec<i32> = factory.rng(|rng| {
                let n = rng.gen_range(1..=3).min(thread.tags.len());
                thread.tags.choose_multiple(rng, n).map(|t| t.id).collect()
            });
            for tag_id in picked {
                link(db, post.id, tag_id).await?;
            }

            let Some(commenter) = factory.rng(|rng| others.choose(rng).copied()) else {
                thread.posts.push(post);
                continue;
            };
            for _ in 0..params.comments_per_post {
                let comment = factory
                    .comment()
                    .post(&post)
                    .author(commenter)
                    .create(db)
                    .await?;
                thread.comments.push(comment);
            }
            thread.posts.push(post);
        }
    }

    tracing::info!(
        posts = thread.posts.len(),
        comments = thread.comments.len(),
        "discussion thread created"
    );
    Ok(thread)
}

/// Row counts inserted by [`bulk_data`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
}

/// Many rows through multi-row `INSERT`s, without any per-row round trip.
///
/// Posts go to random users and comments to random posts by random users.
/// Nothing is created that would have nobody to point at: no posts without
/// users, no comments without posts.
#[instrument(skip(factory, db))]
pub async fn bulk_data<C>(
    factory: &Factory,
    db: &C,
    params: BulkData,
) -> Result<BulkSummary, BlogErr>
where
    C: ConnectionTrait,
{
    let now = Utc::now();
    let mut summary = BulkSummary::default();

    let lightweight = factory.user().lightweight();
    let users: Vec<user::ActiveModel> = (0..params.users_count)
        .map(|_| user::ActiveModel {
            created_at: Set(now),
            ..lightweight.build()
        })
        .collect();
    for chunk in users.chunks(BULK_CHUNK) {
        User::insert_many(chunk.iter().cloned())
            .exec(db)
            .await
            .map_err(BlogErr::inserting("user"))?;
    }
    summary.users = users.len();
    let user_ids = last_ids::<user::Entity, _>(db, user::Column::Id, params.users_count).await?;
    if user_ids.is_empty() {
        return Ok(summary);
    }

    let posts: Vec<post::ActiveModel> = (0..params.posts_count)
        .map(|_| {
            let mut post = factory.post().build();
            post.user_id = Set(factory.rng(|rng| pick(rng, &user_ids)));
            post.created_at = Set(now);
            post
        })
        .collect();
    for chunk in posts.chunks(BULK_CHUNK) {
        Post::insert_many(chunk.iter().cloned())
            .exec(db)
            .await
            .map_err(BlogErr::inserting("post"))?;
    }
    summary.posts = posts.len();
    let post_ids = last_ids::<post::Entity, _>(db, post::Column::Id, params.posts_count).await?;
    if post_ids.is_empty() {
        return Ok(summary);
    }

    let comments: Vec<comment::ActiveModel> = (0..params.comments_count)
        .map(|_| {
            let (user_id, post_id, content) = factory.rng(|rng| {
                (
                    pick(rng, &user_ids),
                    pick(rng, &post_ids),
                    fake::sentence(rng, 4),
                )
            });
            comment::ActiveModel {
                content: Set(content),
                post_id: Set(post_id),
                user_id: Set(user_id),
                created_at: Set(now),
                ..Default::default()
            }
        })
        .collect();
    for chunk in comments.chunks(BULK_CHUNK) {
        Comment::insert_many(chunk.iter().cloned())
            .exec(db)
            .await
            .map_err(BlogErr::inserting("comment"))?;
    }
    summary.comments = comments.len();

    tracing::info!(?summary, "bulk data inserted");
    Ok(summary)
}

/// Ids of the `n` most recently inserted rows
async fn last_ids<E, C>(db: &C, id: E::Column, n: usize) -> Result<Vec<i32>, BlogErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if n == 0 {
        return Ok(Vec::new());
    }
    Ok(E::find()
        .select_only()
        .column(id)
        .order_by_desc(id)
        .limit(n as u64)
        .into_tuple::<i32>()
        .all(db)
        .await?)
}

fn pick<R: Rng>(rng: &mut R, ids: &[i32]) -> i32 {
    ids.choose(rng).copied().unwrap_or_default()
}
