use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::json;
use tasktty_core::{Item, Project};

use crate::protocol::{
    Command, CommandKind, CommandStatus, ItemAddArgs, ItemCompleteArgs, ItemReorderArgs,
    SyncRequest, SyncResponse, FULL_SYNC_TOKEN,
};
use crate::{ServiceError, SyncBackend};

/// In-process implementation of the sync protocol.
///
/// Every object carries the revision at which it last changed; a sync token
/// is the account revision, so incremental responses contain exactly the
/// objects touched since the caller's token.
pub struct MemoryBackend {
    state: Mutex<State>,
}

struct Entry<T> {
    rev: u64,
    value: T,
}

#[derive(Default)]
struct State {
    rev: u64,
    next_id: u64,
    projects: Vec<Entry<Project>>,
    items: Vec<Entry<Item>>,
    offline: bool,
    syncs: usize,
}

impl State {
    fn bump(&mut self) -> u64 {
        self.rev += 1;
        self.rev
    }

    fn fresh_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    fn item_mut(&mut self, id: &str) -> Option<&mut Entry<Item>> {
        self.items.iter_mut().find(|e| e.value.id == id)
    }

    fn apply(
        &mut self,
        cmd: &Command,
        temp_ids: &mut HashMap<String, serde_json::Value>,
    ) -> CommandStatus {
        match cmd.kind {
            CommandKind::ItemAdd => {
                let Ok(args) = serde_json::from_value::<ItemAddArgs>(cmd.args.clone()) else {
                    return CommandStatus::failed("Invalid argument");
                };
                if !self.projects.iter().any(|e| e.value.id == args.project_id) {
                    return CommandStatus::failed("Invalid project");
                }
                let indent = match args.parent_id {
                    Some(ref parent_id) => match self.item_mut(parent_id) {
                        Some(parent) => parent.value.indent + 1,
                        None => return CommandStatus::failed("Invalid parent"),
                    },
                    None => 1,
                };
                let id = self.fresh_id();
                let rev = self.bump();
                self.items.push(Entry {
                    rev,
                    value: Item {
                        id: id.clone(),
                        content: args.content,
                        project_id: args.project_id,
                        parent_id: args.parent_id,
                        item_order: args.child_order,
                        indent,
                        checked: Some(false),
                        is_deleted: Some(false),
                        is_archived: Some(false),
                        due: None,
                    },
                });
                if let Some(ref temp_id) = cmd.temp_id {
                    temp_ids.insert(temp_id.clone(), json!(id));
                }
                CommandStatus::ok()
            }
            CommandKind::ItemReorder => {
                let Ok(args) = serde_json::from_value::<ItemReorderArgs>(cmd.args.clone()) else {
                    return CommandStatus::failed("Invalid argument");
                };
                if let Some(missing) = args
                    .items
                    .iter()
                    .find(|entry| !self.items.iter().any(|e| e.value.id == entry.id))
                {
                    return CommandStatus::failed(format!("Item not found: {}", missing.id));
                }
                let rev = self.bump();
                for entry in &args.items {
                    if let Some(item) = self.item_mut(&entry.id) {
                        item.rev = rev;
                        item.value.item_order = entry.child_order;
                    }
                }
                CommandStatus::ok()
            }
            CommandKind::ItemComplete => {
                let Ok(args) = serde_json::from_value::<ItemCompleteArgs>(cmd.args.clone()) else {
                    return CommandStatus::failed("Invalid argument");
                };
                let rev = self.bump();
                match self.item_mut(&args.id) {
                    Some(entry) => {
                        entry.rev = rev;
                        entry.value.checked = Some(true);
                        CommandStatus::ok()
                    }
                    None => CommandStatus::failed(format!("Item not found: {}", args.id)),
                }
            }
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a top-level project and returns its id.
    pub fn insert_project(&self, name: &str, inbox: bool) -> String {
        let mut state = self.lock();
        let id = state.fresh_id();
        let rev = state.bump();
        let order = state.projects.len() as i64;
        state.projects.push(Entry {
            rev,
            value: Project {
                id: id.clone(),
                name: name.to_string(),
                indent: 1,
                order,
                inbox_project: inbox,
                is_deleted: false,
            },
        });
        id
    }

    /// Adds an open item and returns its id.
    pub fn insert_item(&self, project_id: &str, content: &str, order: i64) -> String {
        let mut state = self.lock();
        let id = state.fresh_id();
        let rev = state.bump();
        state.items.push(Entry {
            rev,
            value: Item {
                id: id.clone(),
                content: content.to_string(),
                project_id: project_id.to_string(),
                parent_id: None,
                item_order: order,
                indent: 1,
                checked: Some(false),
                is_deleted: Some(false),
                is_archived: Some(false),
                due: None,
            },
        });
        id
    }

    /// Edits an item in place, as another client of the account would.
    pub fn update_item(&self, id: &str, edit: impl FnOnce(&mut Item)) {
        let mut state = self.lock();
        let rev = state.bump();
        if let Some(entry) = state.item_mut(id) {
            entry.rev = rev;
            edit(&mut entry.value);
        }
    }

    pub fn update_project(&self, id: &str, edit: impl FnOnce(&mut Project)) {
        let mut state = self.lock();
        let rev = state.bump();
        if let Some(entry) = state.projects.iter_mut().find(|e| e.value.id == id) {
            entry.rev = rev;
            edit(&mut entry.value);
        }
    }

    pub fn items(&self) -> Vec<Item> {
        self.lock().items.iter().map(|e| e.value.clone()).collect()
    }

    pub fn projects(&self) -> Vec<Project> {
        self.lock().projects.iter().map(|e| e.value.clone()).collect()
    }

    /// While offline every sync fails as a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    pub fn sync_count(&self) -> usize {
        self.lock().syncs
    }

    fn sync_now(&self, request: &SyncRequest) -> Result<SyncResponse, ServiceError> {
        let mut state = self.lock();
        state.syncs += 1;
        if state.offline {
            return Err(ServiceError::Internal("connection failed: offline".into()));
        }

        let mut resp = SyncResponse::default();
        for cmd in &request.commands {
            let status = state.apply(cmd, &mut resp.temp_id_mapping);
            resp.sync_status.insert(cmd.uuid.clone(), status);
        }

        let since = match request.sync_token.as_str() {
            FULL_SYNC_TOKEN => None,
            token => token.parse::<u64>().ok(),
        };
        resp.full_sync = since.is_none();
        let since = since.unwrap_or(0);

        resp.projects = state
            .projects
            .iter()
            .filter(|e| e.rev > since)
            .map(|e| e.value.clone())
            .collect();
        resp.items = state
            .items
            .iter()
            .filter(|e| e.rev > since)
            .map(|e| e.value.clone())
            .collect();
        resp.sync_token = state.rev.to_string();
        Ok(resp)
    }
}

#[async_trait]
impl SyncBackend for MemoryBackend {
    async fn sync(&self, request: &SyncRequest) -> Result<SyncResponse, ServiceError> {
        self.sync_now(request)
    }
}
