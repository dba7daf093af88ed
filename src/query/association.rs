//! Level 3: associations and joins.
//!
//! The eager loading challenges resolve the related rows in the same
//! statement (`find_also_related`), so iterating the result never goes back to
//! the database.

use crate::{
    entity::{comment, post, prelude::*, user},
    BlogErr,
};
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder, QuerySelect};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostWithAuthor {
    pub post: post::Model,
    pub author: user::Model,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentWithContext {
    pub comment: comment::Model,
    pub post: post::Model,
    pub author: user::Model,
}

/// Challenge 3.1, one query for posts and authors
pub async fn posts_with_authors<C>(db: &C) -> Result<Vec<PostWithAuthor>, BlogErr>
where
    C: ConnectionTrait,
{
    Post::find()
        .find_also_related(User)
        .order_by_asc(post::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|(post, author)| match author {
            Some(author) => Ok(PostWithAuthor { post, author }),
            None => Err(BlogErr::MissingReference {
                entity: "user",
                id: post.user_id,
            }),
        })
        .collect()
}

/// Challenge 3.2
pub async fn posts_with_comments<C>(db: &C) -> Result<Vec<post::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(Post::find()
        .inner_join(Comment)
        .distinct()
        .order_by_asc(post::Column::Id)
        .all(db)
        .await?)
}

/// Challenge 3.3
pub async fn users_with_posts<C>(db: &C) -> Result<Vec<user::Model>, BlogErr>
where
    C: ConnectionTrait,
{
    Ok(User::find()
        .inner_join(Post)
        .distinct()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?)
}

/// Challenge 3.4, one query for comments with their post and author
pub async fn comments_with_context<C>(db: &C) -> Result<Vec<CommentWithContext>, BlogErr>
where
    C: ConnectionTrait,
{
    Comment::find()
        .find_also_related(Post)
        .find_also_related(User)
        .order_by_asc(comment::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|(comment, post, author)| {
            let post = post.ok_or(BlogErr::MissingReference {
                entity: "post",
                id: comment.post_id,
            })?;
            let author = author.ok_or(BlogErr::MissingReference {
                entity: "user",
                id: comment.user_id,
            })?;
            Ok(CommentWithContext {
                comment,
                post,
                author,
            })
        })
        .collect()
}
