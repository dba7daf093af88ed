//! Per-entity aggregate metrics computed from in-memory relation sets.
//!
//! [`Dataset`] holds every row of the five tables. The derived fields are
//! computed in exactly one place each ([`UserMetrics::from_counts`],
//! [`PostMetrics::from_counts`]) so that the database-backed solutions in
//! [`crate::query`] and this module cannot drift apart.

use crate::{
    entity::{comment, post, post_tag, tag, user},
    BlogErr,
};
use itertools::Itertools;
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};
use serde::Serialize;
use std::collections::HashMap;

/// All rows of the blog schema, each vector in primary key order when loaded
/// from a database.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub users: Vec<user::Model>,
    pub posts: Vec<post::Model>,
    pub comments: Vec<comment::Model>,
    pub tags: Vec<tag::Model>,
    pub post_tags: Vec<post_tag::Model>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserMetrics {
    pub user_id: i32,
    pub name: String,
    pub posts_count: u64,
    pub comments_made: u64,
    pub comments_received: u64,
    pub avg_comments_per_post: f64,
    pub activity_score: u64,
    pub engagement_score: u64,
}

/// Creator or commenter, see [`UserMetrics::role`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Creator,
    Commenter,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PostMetrics {
    pub post_id: i32,
    pub title: String,
    pub comment_count: u64,
    pub tag_count: u64,
    pub comment_tag_ratio: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagUsage {
    pub tag_id: i32,
    pub name: String,
    pub post_count: u64,
}

/// Users split by [`Role`]. Users with as many posts as comments are in
/// neither bucket.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Classification {
    pub creators: Vec<UserMetrics>,
    pub commenters: Vec<UserMetrics>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetricsReport {
    pub users: Vec<UserMetrics>,
    pub posts: Vec<PostMetrics>,
    pub tags: Vec<TagUsage>,
}

impl UserMetrics {
    pub fn from_counts(
        user_id: i32,
        name: &str,
        posts_count: u64,
        comments_made: u64,
        comments_received: u64,
    ) -> Self {
        let avg_comments_per_post = if posts_count > 0 {
            comments_received as f64 / posts_count as f64
        } else {
            0.0
        };
        Self {
            user_id,
            name: name.to_owned(),
            posts_count,
            comments_made,
            comments_received,
            avg_comments_per_post,
            activity_score: posts_count + comments_made,
            engagement_score: posts_count * 2 + comments_made,
        }
    }

    pub fn role(&self) -> Option<Role> {
        use std::cmp::Ordering::*;

        match self.posts_count.cmp(&self.comments_made) {
            Greater => Some(Role::Creator),
            Less => Some(Role::Commenter),
            Equal => None,
        }
    }
}

impl PostMetrics {
    pub fn from_counts(post_id: i32, title: &str, comment_count: u64, tag_count: u64) -> Self {
        let comment_tag_ratio = if tag_count > 0 {
            comment_count as f64 / tag_count as f64
        } else {
            0.0
        };
        Self {
            post_id,
            title: title.to_owned(),
            comment_count,
            tag_count,
            comment_tag_ratio,
        }
    }
}

impl TagUsage {
    /// Used by more than one post
    pub fn is_shared(&self) -> bool {
        self.post_count > 1
    }
}

impl Classification {
    pub fn from_metrics<'a, I>(metrics: I) -> Self
    where
        I: IntoIterator<Item = &'a UserMetrics>,
    {
        let mut classification = Self::default();
        for m in metrics {
            match m.role() {
                Some(Role::Creator) => classification.creators.push(m.clone()),
                Some(Role::Commenter) => classification.commenters.push(m.clone()),
                None => {}
            }
        }
        classification
    }
}

/// The user with the highest activity score; the earliest one wins a tie.
pub fn most_active(metrics: &[UserMetrics]) -> Option<&UserMetrics> {
    metrics.iter().fold(None, |best, m| match best {
        Some(b) if b.activity_score >= m.activity_score => Some(b),
        _ => Some(m),
    })
}

fn tally<K, I>(keys: I) -> HashMap<K, u64>
where
    K: std::hash::Hash + Eq,
    I: IntoIterator<Item = K>,
{
    keys.into_iter()
        .counts()
        .into_iter()
        .map(|(k, n)| (k, n as u64))
        .collect()
}

impl Dataset {
    /// Read every table in primary key order
    pub async fn load<C>(db: &C) -> Result<Self, BlogErr>
    where
        C: ConnectionTrait,
    {
        Ok(Self {
            users: user::Entity::find()
                .order_by_asc(user::Column::Id)
                .all(db)
                .await?,
            posts: post::Entity::find()
                .order_by_asc(post::Column::Id)
                .all(db)
                .await?,
            comments: comment::Entity::find()
                .order_by_asc(comment::Column::Id)
                .all(db)
                .await?,
            tags: tag::Entity::find()
                .order_by_asc(tag::Column::Id)
                .all(db)
                .await?,
            post_tags: post_tag::Entity::find()
                .order_by_asc(post_tag::Column::PostId)
                .order_by_asc(post_tag::Column::TagId)
                .all(db)
                .await?,
        })
    }

    /// One record per user, in input order
    pub fn user_metrics(&self) -> Vec<UserMetrics> {
        let posts_by_author = tally(self.posts.iter().map(|p| p.user_id));
        let comments_by_author = tally(self.comments.iter().map(|c| c.user_id));

        let author_of: HashMap<i32, i32> = self.posts.iter().map(|p| (p.id, p.user_id)).collect();
        let received_by_author = tally(
            self.comments
                .iter()
                .filter_map(|c| author_of.get(&c.post_id).copied()),
        );

        self.users
            .iter()
            .map(|u| {
                UserMetrics::from_counts(
                    u.id,
                    &u.name,
                    posts_by_author.get(&u.id).copied().unwrap_or_default(),
                    comments_by_author.get(&u.id).copied().unwrap_or_default(),
                    received_by_author.get(&u.id).copied().unwrap_or_default(),
                )
            })
            .collect()
    }

    /// One record per post, in input order
    pub fn post_metrics(&self) -> Vec<PostMetrics> {
        let comments_by_post = tally(self.comments.iter().map(|c| c.post_id));
        let tags_by_post = tally(self.post_tags.iter().map(|pt| pt.post_id));

        self.posts
            .iter()
            .map(|p| {
                PostMetrics::from_counts(
                    p.id,
                    &p.title,
                    comments_by_post.get(&p.id).copied().unwrap_or_default(),
                    tags_by_post.get(&p.id).copied().unwrap_or_default(),
                )
            })
            .collect()
    }

    /// One record per tag, in input order, unused tags included
    pub fn tag_usage(&self) -> Vec<TagUsage> {
        let posts_by_tag = tally(self.post_tags.iter().map(|pt| pt.tag_id));

        self.tags
            .iter()
            .map(|t| TagUsage {
                tag_id: t.id,
                name: t.name.clone(),
                post_count: posts_by_tag.get(&t.id).copied().unwrap_or_default(),
            })
            .collect()
    }

    pub fn shared_tags(&self) -> Vec<TagUsage> {
        self.tag_usage()
            .into_iter()
            .filter(TagUsage::is_shared)
            .collect()
    }

    pub fn classify(&self) -> Classification {
        Classification::from_metrics(&self.user_metrics())
    }

    pub fn most_active(&self) -> Option<UserMetrics> {
        most_active(&self.user_metrics()).cloned()
    }

    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            users: self.user_metrics(),
            posts: self.post_metrics(),
            tags: self.tag_usage(),
        }
    }
}
