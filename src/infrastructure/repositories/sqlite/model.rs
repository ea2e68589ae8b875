use chrono::NaiveDateTime;
use diesel::{Identifiable, Insertable, Queryable};

#[derive(Queryable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbItem {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub comments: String,
    pub image: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::items)]
pub struct NewDbItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub comments: String,
    pub image: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Queryable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbTag {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub color: String,
    pub parent: i32,
    pub pinned: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::tags)]
pub struct NewDbTag {
    pub title: String,
    pub description: String,
    pub color: String,
    pub parent: i32,
    pub pinned: bool,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::items_tags)]
pub struct NewDbItemTag {
    pub item_id: i32,
    pub tag_id: i32,
}
