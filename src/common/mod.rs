pub mod command_utils;
pub mod file_utils;
pub mod slug;

pub use slug::slugify;
