pub mod accessor;
pub mod document;
pub mod error;
pub mod path;

pub use accessor::{delete, get, get_mut, set, value_type_name};
pub use document::{Card, Details, Document, Row, Tab};
pub use error::{DocumentError, PathError, Result};
pub use path::{Path, Seg};
