//! Level 4 (aggregations and grouping) and level 5 (complex queries).

use crate::{
    entity::{comment, post, prelude::*, tag, user},
    BlogErr,
};
use itertools::Itertools;
use sea_orm::{
    sea_query::{Alias, Expr},
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryOrder,
    QuerySelect,
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct UserPostCount {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub post_count: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct PostCommentCount {
    pub id: i32,
    pub title: String,
    pub comment_count: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostTagNames {
    pub post: post::Model,
    /// Tag names in tag id order, joined by `", "`; empty without tags
    pub tag_names: String,
}

/// Challenge 4.1, `user_id => post count`. Users without posts are absent.
pub async fn post_count_by_user<C>(db: &C) -> Result<BTreeMap<i32, i64>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(Post::find()
        .select_only()
        .column(post::Column::UserId)
        .column_as(post::Column::Id.count(), "post_count")
        .group_by(post::Column::UserId)
        .into_tuple::<(i32, i64)>()
        .all(db)
        .await?
        .into_iter()
        .collect())
}

/// Challenge 4.2, every user with the number of posts written
pub async fn users_with_post_count<C>(db: &C) -> Result<Vec<UserPostCount>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(select_users_with_post_count()
        .order_by_asc(user::Column::Id)
        .into_model::<UserPostCount>()
        .all(db)
        .await?)
}

fn select_users_with_post_count() -> sea_orm::Select<User> {
    User::find()
        .select_only()
        .column(user::Column::Id)
        .column(user::Column::Name)
        .column(user::Column::Email)
        .column_as(post::Column::Id.count(), "post_count")
        .left_join(Post)
        .group_by(user::Column::Id)
}

/// Challenge 4.3, every post with the number of comments it received
pub async fn posts_with_comment_count<C>(db: &C) -> Result<Vec<PostCommentCount>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(Post::find()
        .select_only()
        .column(post::Column::Id)
        .column(post::Column::Title)
        .column_as(comment::Column::Id.count(), "comment_count")
        .left_join(Comment)
        .group_by(post::Column::Id)
        .order_by_asc(post::Column::Id)
        .into_model::<PostCommentCount>()
        .all(db)
        .await?)
}

/// Challenge 4.4, `0.0` when there are no posts
pub async fn average_comments_per_post<C>(db: &C) -> Result<f64, BlogErr>
where
    C: ConnectionTrait,
{
    let posts = Post::find().count(db).await?;
    if posts == 0 {
        return Ok(0.0);
    }
    let comments = Comment::find().count(db).await?;
    Ok(comments as f64 / posts as f64)
}

/// Challenge 5.1
pub async fn users_with_posts_and_comments<C>(db: &C) -> Result<Vec<user::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(User::find()
        .inner_join(Post)
        .inner_join(Comment)
        .distinct()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?)
}

/// Challenge 5.2, posts with more than `min` comments
pub async fn posts_with_comments_over<C>(db: &C, min: i64) -> Result<Vec<post::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(Post::find()
        .inner_join(Comment)
        .group_by(post::Column::Id)
        .having(Expr::expr(comment::Column::Id.count()).gt(min))
        .order_by_asc(post::Column::Id)
        .all(db)
        .await?)
}

/// Challenge 5.3, most posts first, ties by id
pub async fn users_by_post_count<C>(db: &C) -> Result<Vec<UserPostCount>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(select_users_with_post_count()
        .order_by_desc(Expr::col(Alias::new("post_count")))
        .order_by_asc(user::Column::Id)
        .into_model::<UserPostCount>()
        .all(db)
        .await?)
}

/// Challenge 5.4
pub async fn posts_with_tag_names<C>(db: &C) -> Result<Vec<PostTagNames>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(Post::find()
        .order_by_asc(post::Column::Id)
        .find_with_related(Tag)
        .order_by_asc(tag::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|(post, tags)| PostTagNames {
            post,
            tag_names: tags.iter().map(|t| t.name.as_str()).join(", "),
        })
        .collect())
}
