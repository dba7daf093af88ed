#![allow(dead_code)]

use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use sea_orm_blog::{
    entity::{comment, post, post_tag, tag, user},
    schema, BlogErr,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tracing_subscriber::EnvFilter;

pub struct TestContext {
    pub db: DatabaseConnection,
    statements: Arc<AtomicUsize>,
}

impl TestContext {
    /// A fresh in-memory database with every table created
    pub async fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let mut db = Database::connect("sqlite::memory:").await.unwrap();
        let statements = Arc::new(AtomicUsize::new(0));
        let counter = statements.clone();
        db.set_metric_callback(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        schema::create_tables(&db).await.unwrap();

        Self { db, statements }
    }

    /// Statements executed since the context was created
    pub fn statements(&self) -> usize {
        self.statements.load(Ordering::SeqCst)
    }
}

/// Three users, four tags, five posts, five comments and seven post/tag
/// links.
///
/// John writes posts 1 and 2, Jane 3 and 4, Bob 5. Jane and Bob comment on
/// John's posts, John on Jane's.
pub struct Challenge {
    pub john: user::Model,
    pub jane: user::Model,
    pub bob: user::Model,
    pub ruby: tag::Model,
    pub rails: tag::Model,
    pub javascript: tag::Model,
    pub react: tag::Model,
    pub posts: Vec<post::Model>,
    pub comments: Vec<comment::Model>,
}

impl Challenge {
    pub async fn insert(db: &DatabaseConnection) -> Result<Self, BlogErr> {
        let john = insert_user(db, "John Doe", "john@example.com").await?;
        let jane = insert_user(db, "Jane Smith", "jane@example.com").await?;
        let bob = insert_user(db, "Bob Wilson", "bob@example.com").await?;

        let ruby = insert_tag(db, "Ruby").await?;
        let rails = insert_tag(db, "Rails").await?;
        let javascript = insert_tag(db, "JavaScript").await?;
        let react = insert_tag(db, "React").await?;

        let mut posts = Vec::new();
        for (title, content, author) in [
            ("Getting Started with Ruby", "Ruby basics tutorial", &john),
            ("Advanced Rails Techniques", "Advanced Rails concepts", &john),
            ("JavaScript for Beginners", "JS fundamentals", &jane),
            ("React Development", "React components guide", &jane),
            ("Database Optimization", "SQL optimization tips", &bob),
        ] {
            let post = post::ActiveModel {
                title: Set(title.to_owned()),
                content: Set(content.to_owned()),
                user_id: Set(author.id),
                ..Default::default()
            }
            .insert(db)
            .await?;
            posts.push(post);
        }

        let mut comments = Vec::new();
        for (content, post, author) in [
            ("Great tutorial!", 0, &jane),
            ("Very helpful", 0, &bob),
            ("Thanks for sharing", 1, &jane),
            ("Excellent guide", 2, &john),
            ("Well written", 3, &john),
        ] {
            let comment = comment::ActiveModel {
                content: Set(content.to_owned()),
                post_id: Set(posts[post].id),
                user_id: Set(author.id),
                ..Default::default()
            }
            .insert(db)
            .await?;
            comments.push(comment);
        }

        for (post, tag) in [
            (0, &ruby),
            (0, &rails),
            (1, &ruby),
            (1, &rails),
            (2, &javascript),
            (3, &javascript),
            (3, &react),
        ] {
            post_tag::ActiveModel {
                post_id: Set(posts[post].id),
                tag_id: Set(tag.id),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        Ok(Self {
            john,
            jane,
            bob,
            ruby,
            rails,
            javascript,
            react,
            posts,
            comments,
        })
    }
}

async fn insert_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
) -> Result<user::Model, BlogErr> {
    Ok(user::ActiveModel {
        name: Set(name.to_owned()),
        email: Set(email.to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await?)
}

async fn insert_tag(db: &DatabaseConnection, name: &str) -> Result<tag::Model, BlogErr> {
    Ok(tag::ActiveModel {
        name: Set(name.to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await?)
}
