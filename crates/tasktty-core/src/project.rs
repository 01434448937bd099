use serde::{Deserialize, Serialize};

use crate::wire;

pub const INBOX_NAME: &str = "Inbox";

/// A project as delivered by the remote service. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub name: String,
    /// Nesting depth in the project tree, starting at 1.
    #[serde(default = "default_indent")]
    pub indent: i64,
    #[serde(default, rename = "item_order", alias = "child_order")]
    pub order: i64,
    #[serde(default, deserialize_with = "wire::flag")]
    pub inbox_project: bool,
    #[serde(default, deserialize_with = "wire::flag")]
    pub is_deleted: bool,
}

fn default_indent() -> i64 {
    1
}

impl Project {
    /// Horizontal offset of the project name in the project menu.
    pub fn display_offset(&self) -> usize {
        (self.indent.max(1) as usize - 1) * 2
    }
}
