pub mod common;

use common::TestContext;
use pretty_assertions::assert_eq;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use sea_orm_blog::{
    entity::{prelude::*, user},
    query,
    seed::{self, SeedSummary},
    BlogErr, Dataset,
};

const EXPECTED: SeedSummary = SeedSummary {
    users: 8,
    posts: 12,
    comments: 24,
    tags: 24,
    post_tags: 32,
};

#[tokio::test]
async fn seed_creates_demo_data() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let db = &ctx.db;

    assert_eq!(seed::run(db).await?, EXPECTED);

    let alice = query::find_user_by_email(db, "alice@example.com")
        .await?
        .unwrap();
    assert_eq!(alice.name, "Alice Johnson");

    // Every post is tagged Rails
    let rails: Vec<_> = query::tag_usage(db)
        .await?
        .into_iter()
        .filter(|t| t.name == "Rails")
        .collect();
    assert_eq!(rails[0].post_count, 12);

    // Unknown tag names are skipped
    let posts = query::posts_with_tag_names(db).await?;
    let console = posts
        .iter()
        .find(|p| p.post.title == "Advanced Rails Console Tips and Tricks")
        .unwrap();
    assert_eq!(console.tag_names, "Rails");

    let counts: Vec<_> = query::posts_with_comment_count(db)
        .await?
        .into_iter()
        .map(|p| p.comment_count)
        .collect();
    assert_eq!(counts, vec![2; 12]);

    Ok(())
}

async fn tag_counts(db: &sea_orm::DatabaseConnection) -> Result<Vec<(String, u64)>, BlogErr> {
    Ok(query::tag_usage(db)
        .await?
        .into_iter()
        .map(|t| (t.name, t.post_count))
        .collect())
}

#[tokio::test]
async fn seed_replaces_existing_rows() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let db = &ctx.db;

    user::ActiveModel {
        name: Set("Leftover".to_owned()),
        email: Set("leftover@example.com".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    assert_eq!(seed::run(db).await?, EXPECTED);
    let first = tag_counts(db).await?;

    // Ids move on, names and counts stay
    assert_eq!(seed::run(db).await?, EXPECTED);
    assert_eq!(tag_counts(db).await?, first);

    assert!(query::find_user_by_email(db, "leftover@example.com")
        .await?
        .is_none());
    assert_eq!(User::find().count(db).await?, 8);

    Ok(())
}

#[tokio::test]
async fn seeded_metrics() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let db = &ctx.db;
    seed::run(db).await?;

    let stats = query::user_statistics(db).await?;
    // Alice: posts 1 and 4, comments on posts 2, 5 and 9
    let alice = &stats[0];
    assert_eq!(alice.posts_count, 2);
    assert_eq!(alice.comments_made, 3);
    assert_eq!(alice.comments_received, 4);
    assert_eq!(alice.avg_comments_per_post, 2.0);
    assert_eq!(alice.activity_score, 5);
    assert_eq!(alice.engagement_score, 7);

    assert_eq!(stats, Dataset::load(db).await?.user_metrics());

    Ok(())
}
