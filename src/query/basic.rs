//! Level 1 (basic queries) and level 2 (filtering and conditions).

use crate::{
    entity::{post, prelude::*, user},
    BlogErr,
};
use sea_orm::{
    prelude::DateTimeUtc, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Challenge 1.1
pub async fn all_users<C>(db: &C) -> Result<Vec<user::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(User::find().order_by_asc(user::Column::Id).all(db).await?)
}

/// Challenge 1.2
pub async fn find_user_by_email<C>(db: &C, email: &str) -> Result<Option<user::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?)
}

/// Challenge 1.3
pub async fn posts_ordered_by_title<C>(db: &C) -> Result<Vec<post::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(Post::find()
        .order_by_asc(post::Column::Title)
        .order_by_asc(post::Column::Id)
        .all(db)
        .await?)
}

/// Challenge 1.4
pub async fn count_posts<C>(db: &C) -> Result<u64, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(Post::find().count(db).await?)
}

/// Challenge 2.1
pub async fn posts_by_user<C>(db: &C, user_id: i32) -> Result<Vec<post::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(Post::find()
        .filter(post::Column::UserId.eq(user_id))
        .order_by_asc(post::Column::Id)
        .all(db)
        .await?)
}

/// Challenge 2.2, case-insensitive substring match
pub async fn posts_with_title_containing<C>(
    db: &C,
    needle: &str,
) -> Result<Vec<post::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(Post::find()
        .filter(super::contains_text(post::Column::Title, needle))
        .order_by_asc(post::Column::Id)
        .all(db)
        .await?)
}

/// Challenge 2.3, case-insensitive prefix match
pub async fn users_with_name_prefix<C>(db: &C, prefix: &str) -> Result<Vec<user::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(User::find()
        .filter(super::starts_with_text(user::Column::Name, prefix))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?)
}

/// Challenge 2.4, posts created at or after `since`
pub async fn posts_created_since<C>(
    db: &C,
    since: DateTimeUtc,
) -> Result<Vec<post::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(Post::find()
        .filter(post::Column::CreatedAt.gte(since))
        .order_by_asc(post::Column::Id)
        .all(db)
        .await?)
}
