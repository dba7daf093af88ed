//! Level 7 (expert) and level 8 (master) queries.
//!
//! The metric records are assembled with [`UserMetrics::from_counts`] and
//! [`PostMetrics::from_counts`], so they agree with [`crate::metrics::Dataset`]
//! on the same rows.

use super::count;
use crate::{
    entity::{comment, post, post_tag, prelude::*, tag, user},
    metrics::{self, Classification, MetricsReport, PostMetrics, UserMetrics},
    BlogErr,
};
use sea_orm::{
    prelude::DateTimeUtc,
    sea_query::{Alias, Expr},
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct TrendingPost {
    pub id: i32,
    pub title: String,
    pub recent_comment_count: i64,
}

/// Filters of [`advanced_search`]. All of them must hold.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// The title contains at least one of these; no terms means any title
    pub title_terms: Vec<String>,
    /// Exact tag name
    pub tag: String,
    /// Prefix of the author's name
    pub author_prefix: String,
}

#[derive(Debug, FromQueryResult)]
struct PostCountsRow {
    id: i32,
    title: String,
    comment_count: i64,
    tag_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct UserCountsRow {
    id: i32,
    name: String,
    posts_count: i64,
    comments_made: i64,
}

/// Challenge 7.1, users who commented on a post written by someone else
pub async fn users_commenting_on_others<C>(db: &C) -> Result<Vec<user::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(User::find()
        .inner_join(Comment)
        .join(JoinType::InnerJoin, comment::Relation::Post.def())
        .filter(
            Expr::col((post::Entity, post::Column::UserId))
                .ne(Expr::col((user::Entity, user::Column::Id))),
        )
        .distinct()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?)
}

/// Challenge 7.2, `None` without users
pub async fn most_active_user<C>(db: &C) -> Result<Option<UserMetrics>, BlogErr>
where
    C: ConnectionTrait,
{
    let stats = user_statistics(db).await?;
    Ok(metrics::most_active(&stats).cloned())
}

/// Challenge 7.3, comment and tag counts of every post in one statement
pub async fn posts_with_comment_tag_ratio<C>(db: &C) -> Result<Vec<PostMetrics>, BlogErr>
where
    C: ConnectionTrait,
{
    let rows = Post::find()
        .select_only()
        .column(post::Column::Id)
        .column(post::Column::Title)
        .column_as(
            Expr::col((comment::Entity, comment::Column::Id)).count_distinct(),
            "comment_count",
        )
        .column_as(
            Expr::col((post_tag::Entity, post_tag::Column::TagId)).count_distinct(),
            "tag_count",
        )
        .left_join(Comment)
        .left_join(PostTag)
        .group_by(post::Column::Id)
        .order_by_asc(post::Column::Id)
        .into_model::<PostCountsRow>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            PostMetrics::from_counts(
                row.id,
                &row.title,
                count(row.comment_count),
                count(row.tag_count),
            )
        })
        .collect())
}

/// Challenge 7.4, posts and comments counted in one statement
pub async fn users_with_engagement<C>(db: &C) -> Result<Vec<UserMetrics>, BlogErr>
where
    C: ConnectionTrait,
{
    let rows = User::find()
        .select_only()
        .column(user::Column::Id)
        .column(user::Column::Name)
        .column_as(
            Expr::col((post::Entity, post::Column::Id)).count_distinct(),
            "posts_count",
        )
        .column_as(
            Expr::col((comment::Entity, comment::Column::Id)).count_distinct(),
            "comments_made",
        )
        .left_join(Post)
        .left_join(Comment)
        .group_by(user::Column::Id)
        .order_by_asc(user::Column::Id)
        .into_model::<UserCountsRow>()
        .all(db)
        .await?;
    let received = comments_received_by_author(db).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            UserMetrics::from_counts(
                row.id,
                &row.name,
                count(row.posts_count),
                count(row.comments_made),
                received.get(&row.id).copied().unwrap_or_default(),
            )
        })
        .collect())
}

/// Challenge 8.1, posts with comments created at or after `since`, the most
/// discussed first
pub async fn trending_posts<C>(db: &C, since: DateTimeUtc) -> Result<Vec<TrendingPost>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(Post::find()
        .select_only()
        .column(post::Column::Id)
        .column(post::Column::Title)
        .column_as(comment::Column::Id.count(), "recent_comment_count")
        .inner_join(Comment)
        .filter(comment::Column::CreatedAt.gte(since))
        .group_by(post::Column::Id)
        .order_by_desc(Expr::col(Alias::new("recent_comment_count")))
        .order_by_asc(post::Column::Id)
        .into_model::<TrendingPost>()
        .all(db)
        .await?)
}

/// Challenge 8.2, one grouped query per count
pub async fn user_statistics<C>(db: &C) -> Result<Vec<UserMetrics>, BlogErr>
where
    C: ConnectionTrait,
{
    let posts = grouped_count(
        Post::find()
            .select_only()
            .column(post::Column::UserId)
            .column_as(post::Column::Id.count(), "n")
            .group_by(post::Column::UserId),
        db,
    )
    .await?;
    let made = grouped_count(
        Comment::find()
            .select_only()
            .column(comment::Column::UserId)
            .column_as(comment::Column::Id.count(), "n")
            .group_by(comment::Column::UserId),
        db,
    )
    .await?;
    let received = comments_received_by_author(db).await?;

    let users = User::find().order_by_asc(user::Column::Id).all(db).await?;
    Ok(users
        .iter()
        .map(|u| {
            UserMetrics::from_counts(
                u.id,
                &u.name,
                posts.get(&u.id).copied().unwrap_or_default(),
                made.get(&u.id).copied().unwrap_or_default(),
                received.get(&u.id).copied().unwrap_or_default(),
            )
        })
        .collect())
}

/// Challenge 8.3
pub async fn classify_users<C>(db: &C) -> Result<Classification, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(Classification::from_metrics(&user_statistics(db).await?))
}

/// Challenge 8.4, commented posts matching every filter of `criteria`
pub async fn advanced_search<C>(
    db: &C,
    criteria: &SearchCriteria,
) -> Result<Vec<post::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    let mut cond = Condition::all()
        .add(tag::Column::Name.eq(criteria.tag.as_str()))
        .add(super::starts_with_text(user::Column::Name, &criteria.author_prefix));
    if !criteria.title_terms.is_empty() {
        cond = cond.add(
            criteria
                .title_terms
                .iter()
                .fold(Condition::any(), |any, term| {
                    any.add(super::contains_text(post::Column::Title, term))
                }),
        );
    }

    Ok(Post::find()
        .inner_join(Comment)
        .inner_join(Tag)
        .inner_join(User)
        .filter(cond)
        .distinct()
        .order_by_asc(post::Column::Id)
        .all(db)
        .await?)
}

/// All three metric record sets, counted by the database
pub async fn metrics_report<C>(db: &C) -> Result<MetricsReport, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(MetricsReport {
        users: user_statistics(db).await?,
        posts: posts_with_comment_tag_ratio(db).await?,
        tags: super::tag_usage(db).await?,
    })
}

/// `author id => comments on their posts`
async fn comments_received_by_author<C>(db: &C) -> Result<HashMap<i32, u64>, BlogErr>
where
    C: ConnectionTrait,
{
    grouped_count(
        Comment::find()
            .select_only()
            .column(post::Column::UserId)
            .column_as(comment::Column::Id.count(), "n")
            .inner_join(Post)
            .group_by(post::Column::UserId),
        db,
    )
    .await
}

async fn grouped_count<E, C>(
    select: sea_orm::Select<E>,
    db: &C,
) -> Result<HashMap<i32, u64>, BlogErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    Ok(select
        .into_tuple::<(i32, i64)>()
        .all(db)
        .await?
        .into_iter()
        .map(|(id, n)| (id, count(n)))
        .collect())
}
