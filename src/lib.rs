pub mod config;
pub mod content;
pub mod converter;
pub mod error;
pub mod logger;
pub mod post;
pub mod post_list;
pub mod text_utils;
pub mod view;
mod test_data;
