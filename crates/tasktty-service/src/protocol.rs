//! Request/response shapes of the service's `/sync` endpoint.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tasktty_core::order::OrderChange;
use tasktty_core::{Item, Project};
use uuid::Uuid;

/// Sync token that asks the service for a full snapshot.
pub const FULL_SYNC_TOKEN: &str = "*";

pub const RESOURCE_TYPES: &[&str] = &["projects", "items"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRequest {
    pub sync_token: String,
    pub resource_types: Vec<String>,
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl SyncRequest {
    pub fn new(sync_token: &str, commands: Vec<Command>) -> Self {
        Self {
            sync_token: sync_token.to_string(),
            resource_types: RESOURCE_TYPES.iter().map(|s| s.to_string()).collect(),
            commands,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    ItemAdd,
    ItemReorder,
    ItemComplete,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::ItemAdd => "item_add",
            CommandKind::ItemReorder => "item_reorder",
            CommandKind::ItemComplete => "item_complete",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One queued write. `uuid` keys the per-command result in
/// `SyncResponse::sync_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    #[serde(rename = "type")]
    pub kind: CommandKind,
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<String>,
    pub args: serde_json::Value,
}

/// Arguments of `item_add`. Nesting depth is not sent: the service derives
/// it from `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemAddArgs {
    pub content: String,
    pub project_id: String,
    pub child_order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderEntry {
    pub id: String,
    pub child_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemReorderArgs {
    pub items: Vec<ReorderEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCompleteArgs {
    pub id: String,
}

impl Command {
    pub fn item_add(args: &ItemAddArgs) -> Self {
        let mut body = json!({
            "content": args.content,
            "project_id": args.project_id,
            "child_order": args.child_order,
        });
        if let Some(ref parent_id) = args.parent_id {
            body["parent_id"] = json!(parent_id);
        }
        Self {
            kind: CommandKind::ItemAdd,
            uuid: Uuid::new_v4().to_string(),
            temp_id: Some(Uuid::new_v4().to_string()),
            args: body,
        }
    }

    /// One `item_reorder` carrying every renumbered item of an insert.
    pub fn item_reorder(changes: &[OrderChange]) -> Self {
        let items: Vec<ReorderEntry> = changes
            .iter()
            .map(|c| ReorderEntry {
                id: c.id.clone(),
                child_order: c.item_order,
            })
            .collect();
        Self {
            kind: CommandKind::ItemReorder,
            uuid: Uuid::new_v4().to_string(),
            temp_id: None,
            args: json!({ "items": items }),
        }
    }

    pub fn item_complete(id: &str) -> Self {
        Self {
            kind: CommandKind::ItemComplete,
            uuid: Uuid::new_v4().to_string(),
            temp_id: None,
            args: json!({ "id": id }),
        }
    }
}

/// Per-command result: the literal string `"ok"` or an error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandStatus {
    Done(String),
    Failed {
        error: String,
        #[serde(default)]
        error_code: Option<i64>,
    },
}

impl CommandStatus {
    pub fn ok() -> Self {
        CommandStatus::Done("ok".into())
    }

    pub fn failed(error: impl Into<String>) -> Self {
        CommandStatus::Failed {
            error: error.into(),
            error_code: None,
        }
    }

    /// The failure message, if this status is not `"ok"`.
    pub fn error(&self) -> Option<String> {
        match self {
            CommandStatus::Done(s) if s == "ok" => None,
            CommandStatus::Done(s) => Some(s.clone()),
            CommandStatus::Failed { error, .. } => Some(error.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncResponse {
    pub sync_token: String,
    #[serde(default)]
    pub full_sync: bool,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub sync_status: HashMap<String, CommandStatus>,
    #[serde(default)]
    pub temp_id_mapping: HashMap<String, serde_json::Value>,
}
