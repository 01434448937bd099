pub mod error;
pub mod item;
pub mod order;
pub mod project;
pub mod tree;
pub mod wire;

pub use error::CoreError;
pub use item::{Due, Item, ItemFilter, NewItem, ProjectRef};
pub use project::Project;
