mod browse;
mod cache;
mod config;
mod search;

pub use self::browse::{cat, categories, download, list, show};
pub use self::cache::cache;
pub use self::config::config;
pub use self::search::{keyword, search};
