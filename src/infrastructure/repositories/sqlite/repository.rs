// src/infrastructure/repositories/sqlite/repository

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::Integer;
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, PooledConnection};
use super::error::{SqliteResult, SqliteStoreError};
use super::schema::{items, items_tags, tags};
use crate::domain::error::DomainError;
use crate::domain::item::{Item, NewItem};
use crate::domain::repositories::item_store::ItemStore;
use crate::domain::tag::Tag;
use crate::infrastructure::repositories::sqlite::model::{DbItem, DbTag, NewDbItem, NewDbItemTag, NewDbTag};

#[derive(Clone, Debug)]
pub struct SqliteItemStore {
    pool: ConnectionPool,
}

impl SqliteItemStore {
    /// Create a new SQLite store with the provided connection pool
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Create a new SQLite store with the provided database URL
    #[instrument(skip_all, level = "debug")]
    pub fn from_url(database_url: &str) -> SqliteResult<Self> {
        let pool = super::connection::init_pool(database_url)?;
        Ok(Self { pool })
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteStoreError::ConnectionPoolError(e.to_string()))
    }

    fn to_domain_tag(db_tag: DbTag) -> Tag {
        Tag {
            id: db_tag.id,
            title: db_tag.title,
            description: db_tag.description,
            color: db_tag.color,
            parent: db_tag.parent,
            pinned: db_tag.pinned,
            created_at: db_tag
                .created_at
                .map(|ts| DateTime::<Utc>::from_naive_utc_and_offset(ts, Utc)),
            updated_at: db_tag
                .updated_at
                .map(|ts| DateTime::<Utc>::from_naive_utc_and_offset(ts, Utc)),
        }
    }

    fn to_domain_item(db_item: DbItem) -> Item {
        Item {
            id: db_item.id,
            title: db_item.title,
            description: db_item.description,
            url: db_item.url,
            comments: db_item.comments,
            image: db_item.image,
            created_at: db_item
                .created_at
                .map(|ts| DateTime::<Utc>::from_naive_utc_and_offset(ts, Utc)),
            updated_at: db_item
                .updated_at
                .map(|ts| DateTime::<Utc>::from_naive_utc_and_offset(ts, Utc)),
        }
    }

    /// All stored items, ordered by id.
    pub fn get_items(&self) -> Result<Vec<Item>, DomainError> {
        let mut conn = self.get_connection()?;

        let db_items = items::table
            .order(items::id.asc())
            .load::<DbItem>(&mut conn)
            .map_err(SqliteStoreError::DatabaseError)?;

        Ok(db_items.into_iter().map(Self::to_domain_item).collect())
    }

    /// Tag ids associated with one item, ordered ascending.
    pub fn get_item_tag_ids(&self, item_id: i32) -> Result<Vec<i32>, DomainError> {
        let mut conn = self.get_connection()?;

        let ids = items_tags::table
            .filter(items_tags::item_id.eq(item_id))
            .select(items_tags::tag_id)
            .order(items_tags::tag_id.asc())
            .load::<i32>(&mut conn)
            .map_err(SqliteStoreError::DatabaseError)?;

        Ok(ids)
    }
}

impl ItemStore for SqliteItemStore {
    #[instrument(skip_all, level = "debug")]
    fn get_tags(&self) -> Result<Vec<Tag>, DomainError> {
        let mut conn = self.get_connection()?;

        let db_tags = tags::table
            .order(tags::title.asc())
            .load::<DbTag>(&mut conn)
            .map_err(SqliteStoreError::DatabaseError)?;

        Ok(db_tags.into_iter().map(Self::to_domain_tag).collect())
    }

    #[instrument(skip_all, level = "debug")]
    fn create_item(&self, item: &NewItem) -> Result<i32, DomainError> {
        let mut conn = self.get_connection()?;

        let db_item = NewDbItem {
            title: item.title.clone(),
            description: item.description.clone(),
            url: item.url.clone(),
            comments: item.comments.clone(),
            image: item.image.clone(),
            created_at: Some(item.created_at.unwrap_or_else(Utc::now).naive_utc()),
        };

        // Insert and read back the generated id on the same connection
        let id = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                let inserted = diesel::insert_into(items::table)
                    .values(&db_item)
                    .execute(conn)?;

                if inserted == 0 {
                    return Err(diesel::result::Error::NotFound);
                }

                diesel::select(diesel::dsl::sql::<Integer>("last_insert_rowid()"))
                    .get_result::<i32>(conn)
            })
            .map_err(SqliteStoreError::DatabaseError)?;

        debug!("Inserted item {}: {}", id, item.url);
        Ok(id)
    }

    #[instrument(skip_all, level = "debug")]
    fn attach_item_tags(&self, item_ids: &[i32], tag_ids: &[i32]) -> Result<(), DomainError> {
        if item_ids.is_empty() || tag_ids.is_empty() {
            return Ok(());
        }

        let mut conn = self.get_connection()?;

        let rows: Vec<NewDbItemTag> = item_ids
            .iter()
            .flat_map(|&item_id| {
                tag_ids
                    .iter()
                    .map(move |&tag_id| NewDbItemTag { item_id, tag_id })
            })
            .collect();

        diesel::insert_into(items_tags::table)
            .values(&rows)
            .execute(&mut conn)
            .map_err(SqliteStoreError::DatabaseError)?;

        Ok(())
    }

    #[instrument(skip_all, level = "debug")]
    fn create_tag(
        &self,
        title: &str,
        description: &str,
        parent: i32,
        color: &str,
        pinned: bool,
    ) -> Result<i32, DomainError> {
        let mut conn = self.get_connection()?;

        let db_tag = NewDbTag {
            title: title.to_string(),
            description: description.to_string(),
            color: color.to_string(),
            parent,
            pinned,
            created_at: Some(Utc::now().naive_utc()),
        };

        let id = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                let inserted = diesel::insert_into(tags::table)
                    .values(&db_tag)
                    .execute(conn)?;

                if inserted == 0 {
                    return Err(diesel::result::Error::NotFound);
                }

                diesel::select(diesel::dsl::sql::<Integer>("last_insert_rowid()"))
                    .get_result::<i32>(conn)
            })
            .map_err(SqliteStoreError::DatabaseError)?;

        debug!("Inserted tag {} '{}' under parent {}", id, title, parent);
        Ok(id)
    }

    #[instrument(skip_all, level = "debug")]
    fn update_items_metadata(
        &self,
        title: &str,
        description: &str,
        image: &str,
        item_ids: &[i32],
    ) -> Result<(), DomainError> {
        if item_ids.is_empty() {
            return Ok(());
        }

        let mut conn = self.get_connection()?;

        diesel::update(items::table.filter(items::id.eq_any(item_ids)))
            .set((
                items::title.eq(title),
                items::description.eq(description),
                items::image.eq(image),
                items::updated_at.eq(Some(Utc::now().naive_utc())),
            ))
            .execute(&mut conn)
            .map_err(SqliteStoreError::DatabaseError)?;

        Ok(())
    }

    #[instrument(skip_all, level = "debug")]
    fn get_item_urls(&self, ids: &[i32]) -> Result<Vec<(i32, String)>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.get_connection()?;

        let rows = items::table
            .filter(items::id.eq_any(ids))
            .select((items::id, items::url))
            .order(items::id.asc())
            .load::<(i32, String)>(&mut conn)
            .map_err(SqliteStoreError::DatabaseError)?;

        Ok(rows)
    }
}
