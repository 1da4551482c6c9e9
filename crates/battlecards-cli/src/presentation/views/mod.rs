mod html;
mod text;
pub mod tui;

pub use html::HtmlView;
pub use text::CardTextView;
