pub mod netscape;
pub mod page_meta;
