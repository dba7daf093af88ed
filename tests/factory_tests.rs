pub mod common;

use common::TestContext;
use pretty_assertions::assert_eq;
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter};
use sea_orm_blog::{
    entity::{comment, post, prelude::*, user},
    factory::{BulkData, DiscussionThread, Factory},
    BlogErr,
};
use std::collections::HashSet;

#[tokio::test]
async fn creates_users_with_dynamic_data() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let user = factory.user().create(&ctx.db).await?;
    assert!(!user.name.is_empty());
    assert!(user.email.contains('@'));

    let other = factory.user().create(&ctx.db).await?;
    assert_ne!(user.email, other.email);

    Ok(())
}

#[tokio::test]
async fn creates_user_with_posts() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let user = factory.user().with_posts(5).create(&ctx.db).await?;
    assert_eq!(user.find_related(Post).count(&ctx.db).await?, 5);

    let writer = factory.user().prolific_writer().create(&ctx.db).await?;
    assert_eq!(writer.find_related(Post).count(&ctx.db).await?, 10);

    Ok(())
}

#[tokio::test]
async fn creates_user_with_comments() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let user = factory.user().active_commenter().create(&ctx.db).await?;
    let comments = user.find_related(Comment).all(&ctx.db).await?;
    assert_eq!(comments.len(), 5);

    // All on one post by somebody else
    let posts: HashSet<_> = comments.iter().map(|c| c.post_id).collect();
    assert_eq!(posts.len(), 1);
    assert_eq!(user.find_related(Post).count(&ctx.db).await?, 0);
    assert_eq!(Post::find().count(&ctx.db).await?, 2);

    Ok(())
}

#[tokio::test]
async fn creates_post_with_comments_and_tags() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let post = factory
        .post()
        .with_comments(3)
        .with_tags(2)
        .create(&ctx.db)
        .await?;
    assert_eq!(post.find_related(Comment).count(&ctx.db).await?, 3);
    assert_eq!(post.find_related(Tag).count(&ctx.db).await?, 2);

    let popular = factory.post().popular().create(&ctx.db).await?;
    assert_eq!(popular.find_related(Comment).count(&ctx.db).await?, 5);
    assert_eq!(popular.find_related(Tag).count(&ctx.db).await?, 3);

    Ok(())
}

#[tokio::test]
async fn default_counts() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let writer = factory.user().with_default_posts().create(&ctx.db).await?;
    assert_eq!(writer.find_related(Post).count(&ctx.db).await?, 3);

    let commenter = factory.user().with_default_comments().create(&ctx.db).await?;
    assert_eq!(commenter.find_related(Comment).count(&ctx.db).await?, 2);

    let post = factory
        .post()
        .with_default_comments()
        .with_default_tags()
        .create(&ctx.db)
        .await?;
    assert_eq!(post.find_related(Comment).count(&ctx.db).await?, 2);
    assert_eq!(post.find_related(Tag).count(&ctx.db).await?, 2);

    let tag = factory.tag().with_default_posts().create(&ctx.db).await?;
    assert_eq!(tag.find_related(Post).count(&ctx.db).await?, 2);

    Ok(())
}

#[tokio::test]
async fn creates_named_presets() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let john = factory.user().john_doe().create(&ctx.db).await?;
    let ruby_tag = factory.tag().ruby().create(&ctx.db).await?;
    let ruby_post = factory.post().ruby_post().author(&john).create(&ctx.db).await?;

    assert_eq!(john.name, "John Doe");
    assert_eq!(john.email, "john@example.com");
    assert_eq!(ruby_tag.name, "Ruby");
    assert_eq!(ruby_post.title, "Getting Started with Ruby");
    assert_eq!(ruby_post.user_id, john.id);

    let comment = factory
        .comment()
        .great_tutorial()
        .post(&ruby_post)
        .create(&ctx.db)
        .await?;
    assert_eq!(comment.content, "Great tutorial!");

    let link = factory.post_tag().rails_post_tag().create(&ctx.db).await?;
    let post = Post::find_by_id(link.post_id).one(&ctx.db).await?.unwrap();
    let tag = Tag::find_by_id(link.tag_id).one(&ctx.db).await?.unwrap();
    assert_eq!(post.title, "Advanced Rails Techniques");
    assert_eq!(tag.name, "Rails");

    Ok(())
}

#[tokio::test]
async fn admin_and_guest_users() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::seeded(1);

    let admin = factory.user().admin().create(&ctx.db).await?;
    assert!(admin.name.starts_with("Admin "));
    assert!(admin.email.starts_with("admin+"));
    assert!(admin.email.ends_with("@blog.com"));
    let posts = admin.find_related(Post).all(&ctx.db).await?;
    assert_eq!(posts.len(), 5);
    assert!(posts.iter().all(|p| p.title.starts_with("Admin: ")));

    let guest = factory.user().guest().create(&ctx.db).await?;
    assert!(guest.name.starts_with("Guest "));
    assert!(guest.email.starts_with("guest+"));
    assert_eq!(guest.find_related(Post).count(&ctx.db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn creates_batch_data() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let users = factory.user().create_list(&ctx.db, 10).await?;
    let posts = factory.post().create_list(&ctx.db, 20).await?;
    let comments = factory.comment().create_list(&ctx.db, 50).await?;

    assert_eq!(users.len(), 10);
    assert_eq!(posts.len(), 20);
    assert_eq!(comments.len(), 50);
    // Missing authors and posts are created along the way
    assert_eq!(User::find().count(&ctx.db).await?, 10 + 20 + 50 + 50);
    assert_eq!(Post::find().count(&ctx.db).await?, 20 + 50);

    Ok(())
}

#[tokio::test]
async fn creates_posts_with_comments_for_one_user() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let user = factory.user().create(&ctx.db).await?;
    let posts = factory
        .post()
        .author(&user)
        .with_comments(2)
        .create_list(&ctx.db, 5)
        .await?;

    assert_eq!(user.find_related(Post).count(&ctx.db).await?, 5);
    let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
    assert_eq!(
        Comment::find()
            .filter(comment::Column::PostId.is_in(ids))
            .count(&ctx.db)
            .await?,
        10
    );

    Ok(())
}

#[tokio::test]
async fn creates_cross_references() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let user1 = factory.user().create(&ctx.db).await?;
    let user2 = factory.user().create(&ctx.db).await?;
    let post1 = factory.post().author(&user1).create(&ctx.db).await?;
    let post2 = factory.post().author(&user2).create(&ctx.db).await?;

    factory
        .comment()
        .post(&post2)
        .author(&user1)
        .create(&ctx.db)
        .await?;
    factory
        .comment()
        .post(&post1)
        .author(&user2)
        .create(&ctx.db)
        .await?;

    let (_, author) = post1
        .find_related(Comment)
        .find_also_related(User)
        .one(&ctx.db)
        .await?
        .unwrap();
    assert_eq!(author, Some(user2.clone()));
    let (_, author) = post2
        .find_related(Comment)
        .find_also_related(User)
        .one(&ctx.db)
        .await?
        .unwrap();
    assert_eq!(author, Some(user1));

    let comment = factory
        .comment()
        .on_post_by(&user2)
        .author(&user2)
        .create(&ctx.db)
        .await?;
    let post = Post::find_by_id(comment.post_id).one(&ctx.db).await?.unwrap();
    assert_eq!(post.user_id, user2.id);
    assert_ne!(post.id, post2.id);

    Ok(())
}

#[tokio::test]
async fn creates_tagged_content() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let post1 = factory.post().create(&ctx.db).await?;
    let post2 = factory.post().create(&ctx.db).await?;
    let post3 = factory.post().create(&ctx.db).await?;

    let ruby = factory
        .tag()
        .ruby()
        .on_posts([post1.id, post2.id])
        .create(&ctx.db)
        .await?;
    let rails = factory.tag().rails().create(&ctx.db).await?;
    factory.post_tag().post(&post2).tag(&rails).create(&ctx.db).await?;
    factory.post_tag().post(&post3).tag(&rails).create(&ctx.db).await?;

    assert_eq!(ruby.find_related(Post).count(&ctx.db).await?, 2);
    assert_eq!(rails.find_related(Post).count(&ctx.db).await?, 2);
    assert_eq!(post2.find_related(Tag).count(&ctx.db).await?, 2);

    let tag = factory.tag().with_posts(2).create(&ctx.db).await?;
    assert_eq!(tag.find_related(Post).count(&ctx.db).await?, 2);

    Ok(())
}

#[tokio::test]
async fn build_stubbed_touches_no_database() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let before = ctx.statements();
    let users = factory.user().build_stubbed_list(100);
    let posts = factory.post().build_stubbed_list(3);
    assert_eq!(ctx.statements(), before);

    assert_eq!(users.len(), 100);
    let ids: HashSet<_> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids.len(), 100);
    assert_eq!(posts.len(), 3);
    assert_eq!(User::find().count(&ctx.db).await?, 0);

    let lightweight = factory.user().lightweight().build_stubbed_list(2);
    assert_eq!(lightweight[0].name, "User");
    assert_eq!(lightweight[1].name, "User");
    assert_ne!(lightweight[0].email, lightweight[1].email);

    let context = factory.comment().helpful().build_stubbed_with_context();
    assert_eq!(context.comment.content, "Very helpful");
    assert_eq!(context.comment.post_id, context.post.id);
    assert_eq!(context.comment.user_id, context.commenter.id);
    assert_eq!(context.post.user_id, context.post_author.id);
    assert_ne!(context.commenter.id, context.post_author.id);
    assert_eq!(ctx.statements(), before);

    let built = factory.post().title("Draft").build();
    assert_eq!(built.title, ActiveValue::Set("Draft".to_owned()));
    assert_eq!(built.user_id, ActiveValue::NotSet);
    assert_eq!(Post::find().count(&ctx.db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn duplicates_are_reported() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    factory.user().john_doe().create(&ctx.db).await?;
    let err = factory.user().john_doe().create(&ctx.db).await.unwrap_err();
    assert!(err.is_duplicate(), "{err}");

    factory.tag().ruby().create(&ctx.db).await?;
    let err = factory.tag().ruby().create(&ctx.db).await.unwrap_err();
    assert!(matches!(err, BlogErr::Duplicate { entity: "tag", .. }), "{err}");

    let post = factory.post().create(&ctx.db).await?;
    let tag = factory.tag().create(&ctx.db).await?;
    factory.post_tag().post(&post).tag(&tag).create(&ctx.db).await?;
    let err = factory
        .post_tag()
        .post(&post)
        .tag(&tag)
        .create(&ctx.db)
        .await
        .unwrap_err();
    assert!(
        matches!(err, BlogErr::Duplicate { entity: "post_tag", .. }),
        "{err}"
    );

    Ok(())
}

#[tokio::test]
async fn missing_references_are_reported() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let err = factory.post().author_id(404).create(&ctx.db).await.unwrap_err();
    assert!(
        matches!(err, BlogErr::MissingReference { entity: "user", id: 404 }),
        "{err}"
    );

    let err = factory.comment().post_id(404).create(&ctx.db).await.unwrap_err();
    assert!(
        matches!(err, BlogErr::MissingReference { entity: "post", id: 404 }),
        "{err}"
    );

    let post = factory.post().create(&ctx.db).await?;
    let err = factory
        .post_tag()
        .post(&post)
        .tag_id(404)
        .create(&ctx.db)
        .await
        .unwrap_err();
    assert!(
        matches!(err, BlogErr::MissingReference { entity: "tag", id: 404 }),
        "{err}"
    );

    let err = factory
        .tag()
        .on_posts([404])
        .create(&ctx.db)
        .await
        .unwrap_err();
    assert!(matches!(err, BlogErr::MissingReference { entity: "post", .. }));
    assert_eq!(Tag::find().count(&ctx.db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn post_timestamps() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let recent = factory.post().recent().create(&ctx.db).await?;
    let old = factory.post().old().create(&ctx.db).await?;
    let fresh = factory.post().create(&ctx.db).await?;

    assert!(old.created_at < recent.created_at);
    assert!(recent.created_at < fresh.created_at);
    let found = Post::find()
        .filter(post::Column::CreatedAt.lt(recent.created_at))
        .all(&ctx.db)
        .await?;
    assert_eq!(found, vec![old]);

    Ok(())
}

#[tokio::test]
async fn blog_ecosystem_scenario() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::seeded(7);

    let eco = sea_orm_blog::factory::blog_ecosystem(&factory, &ctx.db).await?;

    assert_eq!(eco.admin.email, "admin@blog.com");
    assert_eq!(eco.writers.len(), 3);
    for writer in &eco.writers {
        assert_eq!(writer.find_related(Post).count(&ctx.db).await?, 3);
    }
    assert_eq!(eco.commenters.len(), 5);
    for commenter in &eco.commenters {
        assert_eq!(commenter.find_related(Comment).count(&ctx.db).await?, 5);
    }
    let names: Vec<_> = eco.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Ruby", "Rails", "JavaScript", "React", "Python"]);

    assert_eq!(eco.featured_posts.len(), 3);
    let programming: HashSet<_> = eco.tags.iter().map(|t| t.id).collect();
    for post in &eco.featured_posts {
        assert_eq!(post.user_id, eco.admin.id);
        assert_eq!(post.find_related(Comment).count(&ctx.db).await?, 5);
        let tags = post.find_related(Tag).all(&ctx.db).await?;
        assert_eq!(tags.len(), 5);
        assert_eq!(
            tags.iter().filter(|t| programming.contains(&t.id)).count(),
            2
        );
    }

    Ok(())
}

#[tokio::test]
async fn discussion_thread_scenario() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::seeded(11);

    let params = DiscussionThread::default();
    let thread = sea_orm_blog::factory::discussion_thread(&factory, &ctx.db, params).await?;

    assert_eq!(thread.users.len(), 3);
    assert_eq!(thread.tags.len(), 5);
    assert_eq!(thread.posts.len(), 6);
    assert_eq!(thread.comments.len(), 18);
    for post in &thread.posts {
        let tags = post.find_related(Tag).count(&ctx.db).await?;
        assert!((1..=3).contains(&tags), "{tags} tags");

        // One commenter per post, never its author
        let commenters: HashSet<_> = thread
            .comments
            .iter()
            .filter(|c| c.post_id == post.id)
            .map(|c| c.user_id)
            .collect();
        assert_eq!(commenters.len(), 1);
        assert!(!commenters.contains(&post.user_id));
    }

    let lonely = sea_orm_blog::factory::discussion_thread(
        &factory,
        &ctx.db,
        DiscussionThread {
            users_count: 1,
            ..params
        },
    )
    .await?;
    assert_eq!(lonely.posts.len(), 2);
    assert!(lonely.comments.is_empty());

    Ok(())
}

#[tokio::test]
async fn bulk_data_scenario() -> Result<(), BlogErr> {
    let ctx = TestContext::new().await;
    let factory = Factory::new();

    let before = ctx.statements();
    let summary = sea_orm_blog::factory::bulk_data(
        &factory,
        &ctx.db,
        BulkData {
            users_count: 10,
            posts_count: 50,
            comments_count: 450,
        },
    )
    .await?;
    // Three chunks of comments, one of posts and users, two id lookups
    assert_eq!(ctx.statements() - before, 7);

    assert_eq!(summary.users, 10);
    assert_eq!(summary.posts, 50);
    assert_eq!(summary.comments, 450);
    assert_eq!(User::find().count(&ctx.db).await?, 10);
    assert_eq!(
        User::find()
            .filter(user::Column::Name.eq("User"))
            .count(&ctx.db)
            .await?,
        10
    );
    assert_eq!(Post::find().count(&ctx.db).await?, 50);
    assert_eq!(Comment::find().count(&ctx.db).await?, 450);

    let empty = sea_orm_blog::factory::bulk_data(
        &factory,
        &ctx.db,
        BulkData {
            users_count: 0,
            posts_count: 5,
            comments_count: 5,
        },
    )
    .await?;
    assert_eq!(empty.posts, 0);
    assert_eq!(Post::find().count(&ctx.db).await?, 50);

    Ok(())
}
