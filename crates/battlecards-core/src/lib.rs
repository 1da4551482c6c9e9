pub mod ids;
pub mod path;

pub use ids::{slugify, tab_id, SuffixClock};
pub use path::{expand_tilde, resolve_workspace_path, Error, Result};
