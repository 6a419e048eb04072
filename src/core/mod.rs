pub mod config;
pub mod error;
pub mod frontmatter;
pub mod listing;
pub mod note;
pub mod paths;
pub mod settings;
pub mod store;
pub mod vault;
