// src/domain/mod.rs
pub mod error;
pub mod import;
pub mod item;
pub mod metadata;
pub mod repositories;
pub mod services;
pub mod tag;
