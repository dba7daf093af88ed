use super::{ensure_exists, fake, link, Factory};
use crate::{
    entity::{post, user},
    BlogErr,
};
use chrono::{Duration, Utc};
use sea_orm::{prelude::DateTimeUtc, ActiveModelTrait, ConnectionTrait, NotSet, Set};

#[derive(Clone, Debug)]
pub struct PostBuilder<'f> {
    factory: &'f Factory,
    title: Option<String>,
    content: Option<String>,
    author: Option<i32>,
    created_at: Option<DateTimeUtc>,
    comments_count: usize,
    tags_count: usize,
}

impl<'f> PostBuilder<'f> {
    pub(super) fn new(factory: &'f Factory) -> Self {
        Self {
            factory,
            title: None,
            content: None,
            author: None,
            created_at: None,
            comments_count: 0,
            tags_count: 0,
        }
    }

    pub fn title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content<T: Into<String>>(mut self, content: T) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn author(self, user: &user::Model) -> Self {
        self.author_id(user.id)
    }

    pub fn author_id(mut self, user_id: i32) -> Self {
        self.author = Some(user_id);
        self
    }

    pub fn created_at(mut self, created_at: DateTimeUtc) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn ruby_post(self) -> Self {
        self.title("Getting Started with Ruby")
            .content("Ruby basics tutorial")
    }

    pub fn rails_post(self) -> Self {
        self.title("Advanced Rails Techniques")
            .content("Advanced Rails concepts")
    }

    pub fn javascript_post(self) -> Self {
        self.title("JavaScript for Beginners")
            .content("JS fundamentals")
    }

    pub fn react_post(self) -> Self {
        self.title("React Development")
            .content("React components guide")
    }

    pub fn database_post(self) -> Self {
        self.title("Database Optimization")
            .content("SQL optimization tips")
    }

    /// Created a day ago
    pub fn recent(self) -> Self {
        self.created_at(Utc::now() - Duration::days(1))
    }

    /// Created a year ago
    pub fn old(self) -> Self {
        self.created_at(Utc::now() - Duration::days(365))
    }

    pub fn with_comments(mut self, n: usize) -> Self {
        self.comments_count = n;
        self
    }

    /// Two comments
    pub fn with_default_comments(self) -> Self {
        self.with_comments(2)
    }

    /// Create `n` new tags and attach them
    pub fn with_tags(mut self, n: usize) -> Self {
        self.tags_count = n;
        self
    }

    /// Two tags
    pub fn with_default_tags(self) -> Self {
        self.with_tags(2)
    }

    pub fn with_many_comments(self) -> Self {
        self.with_comments(5)
    }

    pub fn popular(self) -> Self {
        self.with_many_comments().with_tags(3)
    }

    pub fn build(&self) -> post::ActiveModel {
        post::ActiveModel {
            id: NotSet,
            title: Set(self.resolve_title()),
            content: Set(self.resolve_content()),
            user_id: self.author.map_or(NotSet, Set),
            created_at: self.created_at.map_or(NotSet, Set),
        }
    }

    /// Without an author the post points at a made-up user id
    pub fn build_stubbed(&self) -> post::Model {
        post::Model {
            id: self.factory.next_stub_id(),
            title: self.resolve_title(),
            content: self.resolve_content(),
            user_id: self
                .author
                .unwrap_or_else(|| self.factory.next_stub_id()),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }

    pub fn build_stubbed_list(&self, n: usize) -> Vec<post::Model> {
        (0..n).map(|_| self.build_stubbed()).collect()
    }

    pub async fn create<C>(&self, db: &C) -> Result<post::Model, BlogErr>
    where
        C: ConnectionTrait,
    {
        let post = self.insert(db).await?;

        for _ in 0..self.comments_count {
            self.factory.comment().post(&post).insert(db).await?;
        }
        for _ in 0..self.tags_count {
            let tag = self.factory.tag().insert(db).await?;
            link(db, post.id, tag.id).await?;
        }

        Ok(post)
    }

    pub async fn create_list<C>(&self, db: &C, n: usize) -> Result<Vec<post::Model>, BlogErr>
    where
        C: ConnectionTrait,
    {
        let mut posts = Vec::with_capacity(n);
        for _ in 0..n {
            posts.push(self.create(db).await?);
        }
        Ok(posts)
    }

    /// Insert the post alone, creating an author if none was given
    pub(super) async fn insert<C>(&self, db: &C) -> Result<post::Model, BlogErr>
    where
        C: ConnectionTrait,
    {
        let mut model = self.build();
        match self.author {
            Some(id) => ensure_exists::<user::Entity, _>(db, "user", id).await?,
            None => model.user_id = Set(self.factory.user().insert(db).await?.id),
        }
        model.insert(db).await.map_err(BlogErr::inserting("post"))
    }

    fn resolve_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => self.factory.next_title(),
        }
    }

    fn resolve_content(&self) -> String {
        match &self.content {
            Some(content) => content.clone(),
            None => self.factory.rng(|rng| fake::paragraph(rng, 5)),
        }
    }
}
