// Engine module - turns a document plus navigation state into a view tree
// Every front end (terminal UI, console text, JSON, HTML) draws from the tree

pub mod markup;
mod render;
mod tree;
mod view_state;

pub use render::{render, RenderOptions};
pub use tree::{
    Action, ActionKind, CardPane, DetailBullet, DetailPanel, EditableText, NavItem, RowView,
    SubTabLink, TabPane, ViewTree,
};
pub use view_state::{RowKey, ViewState};
