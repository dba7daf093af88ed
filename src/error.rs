use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// An error from seeding, fixture construction or querying the blog schema
#[derive(Error, Debug)]
pub enum BlogErr {
    /// Any error reported by SeaORM that has no more specific meaning here
    #[error("Database Error: {0}")]
    Db(#[from] DbErr),
    /// A unique column (email, tag name) or the post/tag pair already exists
    #[error("Duplicate {entity}: {detail}")]
    Duplicate {
        /// Table the insert targeted
        entity: &'static str,
        /// Message of the violated constraint
        detail: String,
    },
    /// A referenced row does not exist
    #[error("Missing {entity} with id {id}")]
    MissingReference {
        /// Table the reference points to
        entity: &'static str,
        /// The dangling id
        id: i32,
    },
    /// A foreign key was rejected by the database itself
    #[error("Foreign key violated on {entity}: {detail}")]
    ForeignKey {
        /// Table the insert targeted
        entity: &'static str,
        /// Message of the violated constraint
        detail: String,
    },
    /// Tables that have to exist before reading, see [`crate::schema::ensure_tables`]
    #[error("Missing tables {}, run `seed` or `reset` first", .0.join(", "))]
    MissingTables(Vec<String>),
    /// The configuration file or environment could not be used
    #[error("Config Error: {0}")]
    Config(String),
}

impl BlogErr {
    /// Build an error mapper for an insert into `entity`, translating
    /// constraint violations into [`BlogErr::Duplicate`] and
    /// [`BlogErr::ForeignKey`].
    ///
    /// ```ignore
    /// model.insert(db).await.map_err(BlogErr::inserting("user"))?;
    /// ```
    pub fn inserting(entity: &'static str) -> impl FnOnce(DbErr) -> BlogErr {
        move |err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => BlogErr::Duplicate { entity, detail },
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                BlogErr::ForeignKey { entity, detail }
            }
            _ => BlogErr::Db(err),
        }
    }

    /// `true` for [`BlogErr::Duplicate`]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, BlogErr::Duplicate { .. })
    }
}
