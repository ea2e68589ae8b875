pub mod di;
pub mod html;
pub mod http;
pub mod image_cache;
pub mod pocket;
pub mod repositories;
