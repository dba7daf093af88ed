use super::{ensure_exists, link, Factory, PostBuilder, TagBuilder};
use crate::{
    entity::{post, post_tag, tag},
    BlogErr,
};
use chrono::Utc;
use sea_orm::{ConnectionTrait, NotSet, Set};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Preset {
    Ruby,
    Rails,
}

#[derive(Clone, Debug)]
pub struct PostTagBuilder<'f> {
    factory: &'f Factory,
    post: Option<i32>,
    tag: Option<i32>,
    preset: Option<Preset>,
}

impl<'f> PostTagBuilder<'f> {
    pub(super) fn new(factory: &'f Factory) -> Self {
        Self {
            factory,
            post: None,
            tag: None,
            preset: None,
        }
    }

    pub fn post(self, post: &post::Model) -> Self {
        self.post_id(post.id)
    }

    pub fn post_id(mut self, post_id: i32) -> Self {
        self.post = Some(post_id);
        self
    }

    pub fn tag(self, tag: &tag::Model) -> Self {
        self.tag_id(tag.id)
    }

    pub fn tag_id(mut self, tag_id: i32) -> Self {
        self.tag = Some(tag_id);
        self
    }

    /// A Ruby post tagged `Ruby`, unless post or tag are given
    pub fn ruby_post_tag(mut self) -> Self {
        self.preset = Some(Preset::Ruby);
        self
    }

    /// A Rails post tagged `Rails`, unless post or tag are given
    pub fn rails_post_tag(mut self) -> Self {
        self.preset = Some(Preset::Rails);
        self
    }

    pub fn build(&self) -> post_tag::ActiveModel {
        post_tag::ActiveModel {
            post_id: self.post.map_or(NotSet, Set),
            tag_id: self.tag.map_or(NotSet, Set),
            created_at: NotSet,
        }
    }

    pub fn build_stubbed_list(&self, n: usize) -> Vec<post_tag::Model> {
        (0..n)
            .map(|_| post_tag::Model {
                post_id: self.post.unwrap_or_else(|| self.factory.next_stub_id()),
                tag_id: self.tag.unwrap_or_else(|| self.factory.next_stub_id()),
                created_at: Utc::now(),
            })
            .collect()
    }

    pub async fn create<C>(&self, db: &C) -> Result<post_tag::Model, BlogErr>
    where
        C: ConnectionTrait,
    {
        let post_id = match self.post {
            Some(id) => {
                ensure_exists::<post::Entity, _>(db, "post", id).await?;
                id
            }
            None => self.post_builder().insert(db).await?.id,
        };
        let tag_id = match self.tag {
            Some(id) => {
                ensure_exists::<tag::Entity, _>(db, "tag", id).await?;
                id
            }
            None => self.tag_builder().insert(db).await?.id,
        };
        link(db, post_id, tag_id).await
    }

    pub async fn create_list<C>(&self, db: &C, n: usize) -> Result<Vec<post_tag::Model>, BlogErr>
    where
        C: ConnectionTrait,
    {
        let mut post_tags = Vec::with_capacity(n);
        for _ in 0..n {
            post_tags.push(self.create(db).await?);
        }
        Ok(post_tags)
    }

    fn post_builder(&self) -> PostBuilder<'f> {
        let post = self.factory.post();
        match self.preset {
            Some(Preset::Ruby) => post.ruby_post(),
            Some(Preset::Rails) => post.rails_post(),
            None => post,
        }
    }

    fn tag_builder(&self) -> TagBuilder<'f> {
        let tag = self.factory.tag();
        match self.preset {
            Some(Preset::Ruby) => tag.ruby(),
            Some(Preset::Rails) => tag.rails(),
            None => tag,
        }
    }
}
