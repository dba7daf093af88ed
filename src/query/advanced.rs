//! Level 6: anti joins and many-to-many grouping.

use super::count;
use crate::{
    entity::{comment, post, post_tag, prelude::*, tag, user},
    metrics::TagUsage,
    BlogErr,
};
use itertools::Itertools;
use sea_orm::{
    sea_query::{Alias, Expr},
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct UserCommentsReceived {
    pub id: i32,
    pub name: String,
    pub total_comments: i64,
}

#[derive(Debug, FromQueryResult)]
struct TagUsageRow {
    tag_id: i32,
    name: String,
    post_count: i64,
}

/// Challenge 6.1, tagged posts nobody has commented on
pub async fn posts_with_tags_without_comments<C>(db: &C) -> Result<Vec<post::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(Post::find()
        .inner_join(Tag)
        .left_join(Comment)
        .filter(comment::Column::Id.is_null())
        .distinct()
        .order_by_asc(post::Column::Id)
        .all(db)
        .await?)
}

/// Challenge 6.2, total comments on each author's posts, highest first.
/// Authors whose posts have no comments are absent.
pub async fn users_by_comments_received<C>(db: &C) -> Result<Vec<UserCommentsReceived>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(User::find()
        .select_only()
        .column(user::Column::Id)
        .column(user::Column::Name)
        .column_as(comment::Column::Id.count(), "total_comments")
        .inner_join(Post)
        .join(JoinType::InnerJoin, post::Relation::Comment.def())
        .group_by(user::Column::Id)
        .order_by_desc(Expr::col(Alias::new("total_comments")))
        .order_by_asc(user::Column::Id)
        .into_model::<UserCommentsReceived>()
        .all(db)
        .await?)
}

/// Challenge 6.3, tags attached to more than one post
pub async fn shared_tags<C>(db: &C) -> Result<Vec<TagUsage>, BlogErr>
where
    C: ConnectionTrait,
{
    let select = select_tag_usage()
        .having(Expr::expr(post_tag::Column::PostId.count()).gt(1));
    fetch_tag_usage(select, db).await
}

/// Every tag with the number of posts carrying it, unused tags included
pub async fn tag_usage<C>(db: &C) -> Result<Vec<TagUsage>, BlogErr>
where
    C: ConnectionTrait,
{
    fetch_tag_usage(select_tag_usage(), db).await
}

fn select_tag_usage() -> sea_orm::Select<Tag> {
    Tag::find()
        .select_only()
        .column_as(tag::Column::Id, "tag_id")
        .column(tag::Column::Name)
        .column_as(post_tag::Column::PostId.count(), "post_count")
        .left_join(PostTag)
        .group_by(tag::Column::Id)
        .order_by_asc(tag::Column::Id)
}

async fn fetch_tag_usage<C>(select: sea_orm::Select<Tag>, db: &C) -> Result<Vec<TagUsage>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(select
        .into_model::<TagUsageRow>()
        .all(db)
        .await?
        .into_iter()
        .map(|row| TagUsage {
            tag_id: row.tag_id,
            name: row.name,
            post_count: count(row.post_count),
        })
        .collect())
}

/// Challenge 6.4, posts carrying every tag in `names`.
///
/// Every post qualifies when `names` is empty; repeated names count once.
pub async fn posts_tagged_with_all<C>(db: &C, names: &[&str]) -> Result<Vec<post::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    let names: Vec<&str> = names.iter().copied().unique().collect();
    let mut select = Post::find();
    if !names.is_empty() {
        let wanted = names.len() as i64;
        select = select
            .inner_join(Tag)
            .filter(tag::Column::Name.is_in(names))
            .group_by(post::Column::Id)
            .having(
                Expr::expr(Expr::col((tag::Entity, tag::Column::Id)).count_distinct()).eq(wanted),
            );
    }
    Ok(select.order_by_asc(post::Column::Id).all(db).await?)
}
