// src/domain/repositories/mod.rs
pub mod item_store;
