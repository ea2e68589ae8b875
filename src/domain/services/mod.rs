// src/domain/services/mod.rs
pub mod image_fetcher;
pub mod page_fetcher;
