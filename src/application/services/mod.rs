// src/application/services/mod.rs
pub mod image_service;
pub mod image_service_impl;
pub mod import_service;
pub mod import_service_impl;
pub mod metadata_service;
pub mod metadata_service_impl;
pub mod tag_resolver;
pub mod tag_service;
pub mod tag_service_impl;
