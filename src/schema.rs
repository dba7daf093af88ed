//! Table creation and bulk removal for the blog schema.

use crate::{
    entity::{comment, post, post_tag, tag, user},
    BlogErr,
};
use sea_orm::{
    sea_query::{
        Alias, Expr, Query, SelectStatement, Table, TableCreateStatement, TableDropStatement,
    },
    ConnectionTrait, DbBackend, DbErr, EntityName, EntityTrait, ExecResult, Schema,
};
use tracing::instrument;

async fn create_table<C>(db: &C, stmt: &TableCreateStatement) -> Result<ExecResult, DbErr>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    db.execute(builder.build(stmt)).await
}

async fn create_entity_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    create_table(db, &stmt).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }
    Ok(())
}

async fn drop_table<C>(db: &C, stmt: &TableDropStatement) -> Result<ExecResult, DbErr>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    db.execute(builder.build(stmt)).await
}

/// Create every table, parents before children. Existing tables are kept.
#[instrument(skip_all)]
pub async fn create_tables<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    create_entity_table(db, user::Entity).await?;
    create_entity_table(db, tag::Entity).await?;
    create_entity_table(db, post::Entity).await?;
    create_entity_table(db, comment::Entity).await?;
    create_entity_table(db, post_tag::Entity).await?;
    tracing::debug!("tables created");
    Ok(())
}

/// Drop every table, children before parents.
#[instrument(skip_all)]
pub async fn drop_tables<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    drop_table(db, &Table::drop().table(post_tag::Entity).if_exists().to_owned()).await?;
    drop_table(db, &Table::drop().table(comment::Entity).if_exists().to_owned()).await?;
    drop_table(db, &Table::drop().table(post::Entity).if_exists().to_owned()).await?;
    drop_table(db, &Table::drop().table(tag::Entity).if_exists().to_owned()).await?;
    drop_table(db, &Table::drop().table(user::Entity).if_exists().to_owned()).await?;
    tracing::debug!("tables dropped");
    Ok(())
}

/// Drop and recreate every table.
pub async fn reset<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    drop_tables(db).await?;
    create_tables(db).await
}

/// Delete all rows, children before parents, keeping the tables.
#[instrument(skip_all)]
pub async fn clear<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let post_tags = post_tag::Entity::delete_many().exec(db).await?;
    let comments = comment::Entity::delete_many().exec(db).await?;
    let posts = post::Entity::delete_many().exec(db).await?;
    let tags = tag::Entity::delete_many().exec(db).await?;
    let users = user::Entity::delete_many().exec(db).await?;
    tracing::info!(
        post_tags = post_tags.rows_affected,
        comments = comments.rows_affected,
        posts = posts.rows_affected,
        tags = tags.rows_affected,
        users = users.rows_affected,
        "cleared existing data"
    );
    Ok(())
}

/// Names of the blog tables that do not exist, parents first
pub async fn missing_tables<C>(db: &C) -> Result<Vec<String>, DbErr>
where
    C: ConnectionTrait,
{
    let mut missing = Vec::new();
    for table in [
        user::Entity.table_name(),
        tag::Entity.table_name(),
        post::Entity.table_name(),
        comment::Entity.table_name(),
        post_tag::Entity.table_name(),
    ] {
        if !has_table(db, table).await? {
            missing.push(table.to_owned());
        }
    }
    Ok(missing)
}

/// Fails with [`BlogErr::MissingTables`] unless every table exists
pub async fn ensure_tables<C>(db: &C) -> Result<(), BlogErr>
where
    C: ConnectionTrait,
{
    let missing = missing_tables(db).await?;
    if missing.is_empty() {
        Ok(())
    } else {
        Err(BlogErr::MissingTables(missing))
    }
}

async fn has_table<C>(db: &C, table: &str) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let stmt = has_table_stmt(builder, table);
    let res = db
        .query_one(builder.build(&stmt))
        .await?
        .ok_or_else(|| DbErr::Custom("Failed to check table exists".to_owned()))?;

    res.try_get("", "has_table")
}

fn has_table_stmt(backend: DbBackend, table: &str) -> SelectStatement {
    let mut stmt = Query::select();
    stmt.expr_as(Expr::cust("COUNT(*) > 0"), Alias::new("has_table"));
    match backend {
        DbBackend::Sqlite => stmt
            .from(Alias::new("sqlite_master"))
            .and_where(Expr::col(Alias::new("type")).eq("table"))
            .and_where(Expr::col(Alias::new("name")).eq(table)),
        DbBackend::Postgres => stmt
            .from((Alias::new("information_schema"), Alias::new("tables")))
            .and_where(Expr::col(Alias::new("table_schema")).eq(Expr::cust("CURRENT_SCHEMA()")))
            .and_where(Expr::col(Alias::new("table_name")).eq(table)),
        DbBackend::MySql => stmt
            .from((Alias::new("information_schema"), Alias::new("tables")))
            .and_where(Expr::col(Alias::new("table_schema")).eq(Expr::cust("DATABASE()")))
            .and_where(Expr::col(Alias::new("table_name")).eq(table)),
    };
    stmt
}
