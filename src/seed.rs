//! The demo data set: 8 users, 24 tags, 12 posts and 24 comments.
//!
//! [`run`] replaces whatever is in the tables, so it can be repeated.

use crate::{
    entity::{comment, post, post_tag, prelude::*, tag, user},
    schema, BlogErr,
};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::instrument;

/// Row counts after seeding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub users: u64,
    pub posts: u64,
    pub comments: u64,
    pub tags: u64,
    pub post_tags: u64,
}

const USERS: &[(&str, &str)] = &[
    ("Alice Johnson", "alice@example.com"),
    ("Bob Smith", "bob@example.com"),
    ("Charlie Brown", "charlie@example.com"),
    ("Diana Wilson", "diana@example.com"),
    ("Emma Davis", "emma@example.com"),
    ("Frank Miller", "frank@example.com"),
    ("Grace Lee", "grace@example.com"),
    ("Henry Taylor", "henry@example.com"),
];

const TAGS: &[&str] = &[
    "Ruby",
    "Rails",
    "JavaScript",
    "Python",
    "React",
    "Vue.js",
    "Node.js",
    "API",
    "Frontend",
    "Backend",
    "Database",
    "PostgreSQL",
    "MySQL",
    "DevOps",
    "Docker",
    "AWS",
    "Tutorial",
    "Best Practices",
    "Performance",
    "Security",
    "Testing",
    "Deployment",
    "Mobile",
    "Web Development",
];

struct PostSeed {
    author: usize,
    title: &'static str,
    content: &'static str,
    tags: &'static [&'static str],
}

const POSTS: &[PostSeed] = &[
    PostSeed {
        author: 0,
        title: "Getting Started with Ruby on Rails",
        content: "Ruby on Rails is a powerful web application framework that makes it easy to build robust applications quickly. In this post, we'll explore the basics of Rails and why it's such a popular choice for web development. Rails follows the convention over configuration principle, which means you can get started quickly without having to make many decisions about how to structure your application.",
        tags: &["Ruby", "Rails", "Tutorial"],
    },
    PostSeed {
        author: 1,
        title: "Building RESTful APIs with Rails",
        content: "RESTful APIs are the backbone of modern web applications. In this comprehensive guide, we'll learn how to build scalable and maintainable APIs using Ruby on Rails. We'll cover everything from basic routing to advanced serialization techniques, authentication, and error handling.",
        tags: &["Rails", "API", "Backend"],
    },
    PostSeed {
        author: 2,
        title: "Database Optimization in Rails",
        content: "Database performance is crucial for any web application. In this post, we'll explore various techniques to optimize your Rails application's database queries. We'll cover N+1 queries, eager loading, indexing strategies, and how to use Rails' built-in tools to identify performance bottlenecks.",
        tags: &["Rails", "Database", "Performance", "PostgreSQL"],
    },
    PostSeed {
        author: 0,
        title: "Frontend Development with React and Rails",
        content: "Combining React with Rails creates a powerful full-stack development experience. This tutorial will guide you through setting up a Rails API backend with a React frontend, handling authentication, and managing state between the two frameworks.",
        tags: &["React", "Rails", "Frontend", "JavaScript"],
    },
    PostSeed {
        author: 3,
        title: "Testing Best Practices in Rails",
        content: "Testing is an essential part of software development. In this article, we'll explore the testing ecosystem in Rails, including unit tests, integration tests, and system tests. We'll also discuss TDD (Test-Driven Development) and how to write maintainable test suites.",
        tags: &["Rails", "Testing", "Best Practices"],
    },
    PostSeed {
        author: 4,
        title: "Deploying Rails Applications to Production",
        content: "Taking your Rails application from development to production involves many considerations. We'll cover deployment strategies, environment configuration, database migrations, asset compilation, and monitoring. Whether you're using Heroku, AWS, or your own servers, this guide has you covered.",
        tags: &["Rails", "Deployment", "DevOps", "AWS"],
    },
    PostSeed {
        author: 1,
        title: "Understanding Active Record Associations",
        content: "Active Record associations are one of the most powerful features of Rails. In this detailed post, we'll explore has_many, belongs_to, has_one, and many-to-many relationships. We'll also cover advanced topics like polymorphic associations and through associations.",
        tags: &["Rails", "Database", "Tutorial"],
    },
    PostSeed {
        author: 5,
        title: "Security Best Practices for Rails Applications",
        content: "Security should be a top priority in any web application. Rails provides many built-in security features, but there are additional steps you should take to secure your application. We'll discuss authentication, authorization, SQL injection prevention, XSS protection, and more.",
        tags: &["Rails", "Security", "Best Practices"],
    },
    PostSeed {
        author: 2,
        title: "Performance Monitoring and Optimization",
        content: "Monitoring your Rails application's performance is crucial for maintaining a good user experience. In this post, we'll explore various tools and techniques for monitoring performance, identifying bottlenecks, and optimizing your application for better speed and efficiency.",
        tags: &["Rails", "Performance", "Monitoring"],
    },
    PostSeed {
        author: 6,
        title: "Building Real-time Features with Action Cable",
        content: "Action Cable brings real-time functionality to Rails applications through WebSockets. In this tutorial, we'll build a real-time chat application, exploring how to set up channels, handle connections, and broadcast updates to connected clients.",
        tags: &["Rails", "WebSocket", "Real-time"],
    },
    PostSeed {
        author: 3,
        title: "Microservices Architecture with Rails",
        content: "As applications grow, you might consider breaking them into microservices. This post explores how to architect Rails applications as microservices, including service communication, data consistency, and deployment strategies.",
        tags: &["Rails", "Microservices", "Architecture"],
    },
    PostSeed {
        author: 7,
        title: "Advanced Rails Console Tips and Tricks",
        content: "The Rails console is a powerful tool for debugging and exploring your application. In this post, we'll share advanced tips and tricks for using the console more effectively, including custom helpers, debugging techniques, and productivity shortcuts.",
        tags: &["Rails", "Console", "Debugging"],
    },
];

/// `(post, author, content)`, indexes into [`POSTS`] and [`USERS`]
const COMMENTS: &[(usize, usize, &str)] = &[
    (0, 1, "Great introduction to Rails! This really helped me understand the basics."),
    (0, 2, "Thanks for sharing this. The convention over configuration principle is one of the things I love most about Rails."),
    (1, 0, "Excellent guide on RESTful APIs. The examples are very clear and easy to follow."),
    (1, 3, "I've been struggling with API design and this post really clarified things for me."),
    (2, 4, "The database optimization tips are gold! My app is running much faster now."),
    (2, 1, "N+1 queries were killing my app's performance. This post saved me!"),
    (3, 5, "React + Rails is such a powerful combination. Thanks for the tutorial!"),
    (3, 2, "I was looking for exactly this kind of setup. The authentication part was particularly helpful."),
    (4, 6, "Testing has always been intimidating to me, but this post makes it seem approachable."),
    (4, 0, "TDD changed my development workflow completely. Great explanation of the concepts."),
    (5, 7, "Deployment can be tricky, but this guide covers all the important aspects."),
    (5, 1, "The environment configuration section was exactly what I needed. Thanks!"),
    (6, 3, "Active Record associations are so powerful once you understand them properly."),
    (6, 4, "The polymorphic associations example really cleared up my confusion."),
    (7, 2, "Security is so important and often overlooked. Great comprehensive guide!"),
    (7, 5, "The XSS protection tips are particularly valuable. Thanks for sharing!"),
    (8, 6, "Performance monitoring is crucial for production apps. Great tool recommendations!"),
    (8, 0, "I implemented some of these optimizations and saw immediate improvements."),
    (9, 7, "Action Cable is amazing for real-time features. The chat example is perfect!"),
    (9, 1, "WebSockets were confusing to me before, but this tutorial makes it clear."),
    (10, 4, "Microservices architecture is complex, but this post breaks it down well."),
    (10, 3, "The service communication patterns are really useful. Thanks for the insights!"),
    (11, 5, "I learn so much from these console tips! My debugging process is much faster now."),
    (11, 2, "The custom helpers section is genius. I'm implementing these right away."),
];

/// Replace the content of every table with the demo data set.
///
/// Everything happens in one transaction; on error nothing changes.
#[instrument(skip_all)]
pub async fn run<C>(db: &C) -> Result<SeedSummary, BlogErr>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    schema::clear(&txn).await?;

    let mut users = Vec::with_capacity(USERS.len());
    for (name, email) in USERS {
        let user = user::ActiveModel {
            name: Set((*name).to_owned()),
            email: Set((*email).to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(BlogErr::inserting("user"))?;
        users.push(user.id);
    }
    tracing::info!(count = users.len(), "created users");

    let mut tags = HashMap::with_capacity(TAGS.len());
    for name in TAGS {
        let tag = tag::ActiveModel {
            name: Set((*name).to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(BlogErr::inserting("tag"))?;
        tags.insert(*name, tag.id);
    }
    tracing::info!(count = tags.len(), "created tags");

    let mut posts = Vec::with_capacity(POSTS.len());
    for seed in POSTS {
        let post = post::ActiveModel {
            title: Set(seed.title.to_owned()),
            content: Set(seed.content.to_owned()),
            user_id: Set(users[seed.author]),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(BlogErr::inserting("post"))?;
        posts.push(post.id);
    }
    tracing::info!(count = posts.len(), "created posts");

    let mut links = 0;
    for (seed, post_id) in POSTS.iter().zip(&posts) {
        for name in seed.tags {
            let Some(tag_id) = tags.get(name) else {
                tracing::debug!(post = seed.title, tag = name, "skipping unknown tag");
                continue;
            };
            post_tag::ActiveModel {
                post_id: Set(*post_id),
                tag_id: Set(*tag_id),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(BlogErr::inserting("post_tag"))?;
            links += 1;
        }
    }
    tracing::info!(count = links, "created post-tag associations");

    for (post, author, content) in COMMENTS {
        comment::ActiveModel {
            content: Set((*content).to_owned()),
            post_id: Set(posts[*post]),
            user_id: Set(users[*author]),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(BlogErr::inserting("comment"))?;
    }
    tracing::info!(count = COMMENTS.len(), "created comments");

    txn.commit().await?;

    let summary = SeedSummary {
        users: User::find().count(db).await?,
        posts: Post::find().count(db).await?,
        comments: Comment::find().count(db).await?,
        tags: Tag::find().count(db).await?,
        post_tags: PostTag::find().count(db).await?,
    };
    tracing::info!(?summary, "seed data created");
    Ok(summary)
}
