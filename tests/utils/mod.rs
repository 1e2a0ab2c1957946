pub mod requests;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use requests::{body_cards, body_json, cookie_from, get, post, post_json};
#[allow(unused_imports)]
pub use setup::{temp_path, TestApp};
