use super::{ensure_exists, fake, Factory};
use crate::{
    entity::{comment, post, user},
    BlogErr,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, NotSet, Set};

/// What [`CommentBuilder::build_stubbed_with_context`] returns
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentContext {
    pub comment: comment::Model,
    pub post: post::Model,
    pub post_author: user::Model,
    pub commenter: user::Model,
}

#[derive(Clone, Debug)]
pub struct CommentBuilder<'f> {
    factory: &'f Factory,
    content: Option<String>,
    post: Option<i32>,
    post_author: Option<i32>,
    author: Option<i32>,
}

impl<'f> CommentBuilder<'f> {
    pub(super) fn new(factory: &'f Factory) -> Self {
        Self {
            factory,
            content: None,
            post: None,
            post_author: None,
            author: None,
        }
    }

    pub fn content<T: Into<String>>(mut self, content: T) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn post(self, post: &post::Model) -> Self {
        self.post_id(post.id)
    }

    pub fn post_id(mut self, post_id: i32) -> Self {
        self.post = Some(post_id);
        self
    }

    pub fn author(self, user: &user::Model) -> Self {
        self.author_id(user.id)
    }

    pub fn author_id(mut self, user_id: i32) -> Self {
        self.author = Some(user_id);
        self
    }

    /// Comment on a new post written by `user`
    pub fn on_post_by(mut self, user: &user::Model) -> Self {
        self.post = None;
        self.post_author = Some(user.id);
        self
    }

    pub fn great_tutorial(self) -> Self {
        self.content("Great tutorial!")
    }

    pub fn helpful(self) -> Self {
        self.content("Very helpful")
    }

    pub fn thanks(self) -> Self {
        self.content("Thanks for sharing")
    }

    pub fn excellent(self) -> Self {
        self.content("Excellent guide")
    }

    pub fn well_written(self) -> Self {
        self.content("Well written")
    }

    pub fn build(&self) -> comment::ActiveModel {
        comment::ActiveModel {
            id: NotSet,
            content: Set(self.resolve_content()),
            post_id: self.post.map_or(NotSet, Set),
            user_id: self.author.map_or(NotSet, Set),
            created_at: NotSet,
        }
    }

    /// A stubbed comment on a stubbed post, with both users stubbed as well.
    ///
    /// The post always gets a new stub. Its author is never the commenter:
    /// `on_post_by` is ignored when it names the comment's author.
    pub fn build_stubbed_with_context(&self) -> CommentContext {
        let mut commenter = self.factory.user().build_stubbed();
        if let Some(id) = self.author {
            commenter.id = id;
        }
        let mut post_author = self.factory.user().build_stubbed();
        if let Some(id) = self.post_author.filter(|&id| id != commenter.id) {
            post_author.id = id;
        }
        let post = self.factory.post().author(&post_author).build_stubbed();
        let comment = comment::Model {
            id: self.factory.next_stub_id(),
            content: self.resolve_content(),
            post_id: post.id,
            user_id: commenter.id,
            created_at: Utc::now(),
        };

        CommentContext {
            comment,
            post,
            post_author,
            commenter,
        }
    }

    pub fn build_stubbed_list(&self, n: usize) -> Vec<comment::Model> {
        (0..n)
            .map(|_| comment::Model {
                id: self.factory.next_stub_id(),
                content: self.resolve_content(),
                post_id: self.post.unwrap_or_else(|| self.factory.next_stub_id()),
                user_id: self.author.unwrap_or_else(|| self.factory.next_stub_id()),
                created_at: Utc::now(),
            })
            .collect()
    }

    pub async fn create<C>(&self, db: &C) -> Result<comment::Model, BlogErr>
    where
        C: ConnectionTrait,
    {
        self.insert(db).await
    }

    pub async fn create_list<C>(&self, db: &C, n: usize) -> Result<Vec<comment::Model>, BlogErr>
    where
        C: ConnectionTrait,
    {
        let mut comments = Vec::with_capacity(n);
        for _ in 0..n {
            comments.push(self.create(db).await?);
        }
        Ok(comments)
    }

    /// Insert the comment, creating its post and author if none were given
    pub(super) async fn insert<C>(&self, db: &C) -> Result<comment::Model, BlogErr>
    where
        C: ConnectionTrait,
    {
        let mut model = self.build();

        match (self.post, self.post_author) {
            (Some(id), _) => ensure_exists::<post::Entity, _>(db, "post", id).await?,
            (None, Some(author)) => {
                let post = self.factory.post().author_id(author).insert(db).await?;
                model.post_id = Set(post.id);
            }
            (None, None) => model.post_id = Set(self.factory.post().insert(db).await?.id),
        }
        match self.author {
            Some(id) => ensure_exists::<user::Entity, _>(db, "user", id).await?,
            None => model.user_id = Set(self.factory.user().insert(db).await?.id),
        }

        model.insert(db).await.map_err(BlogErr::inserting("comment"))
    }

    fn resolve_content(&self) -> String {
        match &self.content {
            Some(content) => content.clone(),
            None => self.factory.rng(|rng| fake::sentence(rng, 4)),
        }
    }
}
