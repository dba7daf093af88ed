use super::{ensure_exists, link, Factory};
use crate::{
    entity::{post, tag},
    BlogErr,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, NotSet, Set};

#[derive(Clone, Debug)]
pub struct TagBuilder<'f> {
    factory: &'f Factory,
    name: Option<String>,
    posts_count: usize,
    posts: Vec<i32>,
}

impl<'f> TagBuilder<'f> {
    pub(super) fn new(factory: &'f Factory) -> Self {
        Self {
            factory,
            name: None,
            posts_count: 0,
            posts: Vec::new(),
        }
    }

    pub fn name<T: Into<String>>(mut self, name: T) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn ruby(self) -> Self {
        self.name("Ruby")
    }

    pub fn rails(self) -> Self {
        self.name("Rails")
    }

    pub fn javascript(self) -> Self {
        self.name("JavaScript")
    }

    pub fn react(self) -> Self {
        self.name("React")
    }

    pub fn python(self) -> Self {
        self.name("Python")
    }

    pub fn vue(self) -> Self {
        self.name("Vue")
    }

    /// Create `n` new posts carrying the tag
    pub fn with_posts(mut self, n: usize) -> Self {
        self.posts_count = n;
        self
    }

    /// Two new posts
    pub fn with_default_posts(self) -> Self {
        self.with_posts(2)
    }

    /// Attach the tag to existing posts
    pub fn on_posts<I>(mut self, post_ids: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        self.posts.extend(post_ids);
        self
    }

    pub fn build(&self) -> tag::ActiveModel {
        tag::ActiveModel {
            id: NotSet,
            name: Set(self.resolve_name()),
            created_at: NotSet,
        }
    }

    pub fn build_stubbed_list(&self, n: usize) -> Vec<tag::Model> {
        (0..n)
            .map(|_| tag::Model {
                id: self.factory.next_stub_id(),
                name: self.resolve_name(),
                created_at: Utc::now(),
            })
            .collect()
    }

    pub async fn create<C>(&self, db: &C) -> Result<tag::Model, BlogErr>
    where
        C: ConnectionTrait,
    {
        for &post_id in &self.posts {
            ensure_exists::<post::Entity, _>(db, "post", post_id).await?;
        }
        let tag = self.insert(db).await?;

        for &post_id in &self.posts {
            link(db, post_id, tag.id).await?;
        }
        for _ in 0..self.posts_count {
            let post = self.factory.post().insert(db).await?;
            link(db, post.id, tag.id).await?;
        }

        Ok(tag)
    }

    pub async fn create_list<C>(&self, db: &C, n: usize) -> Result<Vec<tag::Model>, BlogErr>
    where
        C: ConnectionTrait,
    {
        let mut tags = Vec::with_capacity(n);
        for _ in 0..n {
            tags.push(self.create(db).await?);
        }
        Ok(tags)
    }

    /// Insert the tag alone
    pub(super) async fn insert<C>(&self, db: &C) -> Result<tag::Model, BlogErr>
    where
        C: ConnectionTrait,
    {
        self.build()
            .insert(db)
            .await
            .map_err(BlogErr::inserting("tag"))
    }

    fn resolve_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.factory.next_tag_name(),
        }
    }
}
