pub mod config;
pub mod daily;
pub mod list;
pub mod note;
pub mod voice;
