// src/infrastructure/repositories/sqlite/error.rs

use diesel::r2d2;
use diesel::result::Error as DieselError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteStoreError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DieselError),

    #[error("Diesel connection error: {0}")]
    ConnectionError(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    #[error("Item not found with ID: {0}")]
    ItemNotFound(i32),

    #[error("Failed to convert entity: {0}")]
    ConversionError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Store operation failed: {0}")]
    OperationFailed(String),
}

pub type SqliteResult<T> = Result<T, SqliteStoreError>;

impl From<r2d2::Error> for SqliteStoreError {
    fn from(err: r2d2::Error) -> Self {
        SqliteStoreError::ConnectionPoolError(err.to_string())
    }
}

impl From<SqliteStoreError> for crate::domain::error::DomainError {
    fn from(err: SqliteStoreError) -> Self {
        use crate::domain::error::DomainError;
        match err {
            SqliteStoreError::ItemNotFound(id) => DomainError::ItemNotFound(id.to_string()),
            SqliteStoreError::DatabaseError(diesel_err) => match diesel_err {
                DieselError::NotFound => {
                    DomainError::ItemNotFound("Resource not found".to_string())
                }
                DieselError::DatabaseError(_, info) => {
                    DomainError::Storage(format!("Database error: {}", info.message()))
                }
                _ => DomainError::Storage(format!("Database error: {}", diesel_err)),
            },
            SqliteStoreError::ConnectionError(e) => {
                DomainError::Storage(format!("Database connection error: {}", e))
            }
            SqliteStoreError::ConnectionPoolError(e) => {
                DomainError::Storage(format!("Connection pool error: {}", e))
            }
            SqliteStoreError::ConversionError(e) => {
                DomainError::Storage(format!("Data conversion error: {}", e))
            }
            SqliteStoreError::IoError(e) => DomainError::Storage(format!("IO error: {}", e)),
            SqliteStoreError::MigrationError(e) => {
                DomainError::Storage(format!("Migration error: {}", e))
            }
            SqliteStoreError::OperationFailed(e) => DomainError::Storage(e),
        }
    }
}
