pub mod image_fetcher;
pub mod page_fetcher;
