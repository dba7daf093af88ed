use super::{fake, Factory};
use crate::{entity::user, BlogErr};
use chrono::Utc;
use rand::Rng;
use sea_orm::{ActiveModelTrait, ConnectionTrait, NotSet, Set};

#[derive(Clone, Debug)]
pub struct UserBuilder<'f> {
    factory: &'f Factory,
    name: Option<String>,
    email: Option<String>,
    posts_count: usize,
    post_title_prefix: Option<&'static str>,
    comments_count: usize,
}

impl<'f> UserBuilder<'f> {
    pub(super) fn new(factory: &'f Factory) -> Self {
        Self {
            factory,
            name: None,
            email: None,
            posts_count: 0,
            post_title_prefix: None,
            comments_count: 0,
        }
    }

    pub fn name<T: Into<String>>(mut self, name: T) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email<T: Into<String>>(mut self, email: T) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn john_doe(self) -> Self {
        self.name("John Doe").email("john@example.com")
    }

    pub fn jane_smith(self) -> Self {
        self.name("Jane Smith").email("jane@example.com")
    }

    pub fn bob_wilson(self) -> Self {
        self.name("Bob Wilson").email("bob@example.com")
    }

    /// `Admin <last name>` with five posts titled `Admin: ...`
    pub fn admin(mut self) -> Self {
        let (last_name, hex) = self
            .factory
            .rng(|rng| (fake::last_name(rng), fake::hex(rng, 8)));
        self.posts_count = 5;
        self.post_title_prefix = Some("Admin: ");
        self.name(format!("Admin {last_name}"))
            .email(format!("admin+{hex}@blog.com"))
    }

    pub fn guest(self) -> Self {
        let (first_name, hex) = self
            .factory
            .rng(|rng| (fake::first_name(rng), fake::hex(rng, 8)));
        self.name(format!("Guest {first_name}"))
            .email(format!("guest+{hex}@blog.com"))
    }

    /// Named `User`, for bulk inserts where only the email has to differ
    pub fn lightweight(self) -> Self {
        self.name("User")
    }

    /// Create `n` posts written by the user
    pub fn with_posts(mut self, n: usize) -> Self {
        self.posts_count = n;
        self
    }

    /// Three posts
    pub fn with_default_posts(self) -> Self {
        self.with_posts(3)
    }

    pub fn prolific_writer(self) -> Self {
        self.with_posts(10)
    }

    /// Create two posts by other users and leave `n` comments on one of them
    pub fn with_comments(mut self, n: usize) -> Self {
        self.comments_count = n;
        self
    }

    /// Two comments
    pub fn with_default_comments(self) -> Self {
        self.with_comments(2)
    }

    pub fn active_commenter(self) -> Self {
        self.with_comments(5)
    }

    pub fn build(&self) -> user::ActiveModel {
        user::ActiveModel {
            id: NotSet,
            name: Set(self.resolve_name()),
            email: Set(self.resolve_email()),
            created_at: NotSet,
        }
    }

    pub fn build_stubbed(&self) -> user::Model {
        user::Model {
            id: self.factory.next_stub_id(),
            name: self.resolve_name(),
            email: self.resolve_email(),
            created_at: Utc::now(),
        }
    }

    pub fn build_stubbed_list(&self, n: usize) -> Vec<user::Model> {
        (0..n).map(|_| self.build_stubbed()).collect()
    }

    pub async fn create<C>(&self, db: &C) -> Result<user::Model, BlogErr>
    where
        C: ConnectionTrait,
    {
        let user = self.insert(db).await?;

        for _ in 0..self.posts_count {
            let mut post = self.factory.post().author(&user);
            if let Some(prefix) = self.post_title_prefix {
                let sentence = self.factory.rng(|rng| fake::sentence(rng, 4));
                post = post.title(format!("{prefix}{sentence}"));
            }
            post.insert(db).await?;
        }

        if self.comments_count > 0 {
            let mut posts = Vec::with_capacity(2);
            for _ in 0..2 {
                posts.push(self.factory.post().insert(db).await?);
            }
            let target = self.factory.rng(|rng| rng.gen_range(0..posts.len()));
            for _ in 0..self.comments_count {
                self.factory
                    .comment()
                    .post(&posts[target])
                    .author(&user)
                    .insert(db)
                    .await?;
            }
        }

        Ok(user)
    }

    pub async fn create_list<C>(&self, db: &C, n: usize) -> Result<Vec<user::Model>, BlogErr>
    where
        C: ConnectionTrait,
    {
        let mut users = Vec::with_capacity(n);
        for _ in 0..n {
            users.push(self.create(db).await?);
        }
        Ok(users)
    }

    /// Insert the user alone
    pub(super) async fn insert<C>(&self, db: &C) -> Result<user::Model, BlogErr>
    where
        C: ConnectionTrait,
    {
        self.build()
            .insert(db)
            .await
            .map_err(BlogErr::inserting("user"))
    }

    fn resolve_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.factory.rng(|rng| fake::name(rng)),
        }
    }

    fn resolve_email(&self) -> String {
        match &self.email {
            Some(email) => email.clone(),
            None => self.factory.next_email(),
        }
    }
}
