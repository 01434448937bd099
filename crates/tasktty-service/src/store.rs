use std::mem;

use tasktty_core::order::shift_orders;
use tasktty_core::project::INBOX_NAME;
use tasktty_core::tree;
use tasktty_core::{Item, ItemFilter, NewItem, Project, ProjectRef};
use tracing::{debug, info, warn};

use crate::protocol::{Command, ItemAddArgs, SyncRequest, SyncResponse, FULL_SYNC_TOKEN};
use crate::{BlockingService, HttpService, ServiceError, SyncBackend};

/// Read-through cache of one account, kept current by the sync protocol.
///
/// Projects and items are only ever created or removed by the service; the
/// one local mutation is the order shift applied just before an insert.
/// Every mutating call commits immediately.
pub struct TaskStore<B = HttpService> {
    service: BlockingService<B>,
    sync_token: String,
    projects: Vec<Project>,
    items: Vec<Item>,
    pending: Vec<Command>,
}

impl<B: SyncBackend> TaskStore<B> {
    pub fn new(service: BlockingService<B>) -> Self {
        Self {
            service,
            sync_token: FULL_SYNC_TOKEN.to_string(),
            projects: Vec::new(),
            items: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn service(&self) -> &BlockingService<B> {
        &self.service
    }

    /// Pulls remote changes into the cache. The first call fetches the full
    /// account; later calls only fetch what changed.
    pub fn sync(&mut self) -> Result<(), ServiceError> {
        self.round_trip(Vec::new()).map(|_| ())
    }

    /// Pushes queued commands. The queue is emptied even when the push
    /// fails, so a rejected command is never replayed.
    pub fn commit(&mut self) -> Result<(), ServiceError> {
        let commands = mem::take(&mut self.pending);
        if commands.is_empty() {
            return Ok(());
        }
        let resp = match self.round_trip(commands.clone()) {
            Ok(resp) => resp,
            Err(e) => {
                // Optimistic local edits may now disagree with the service.
                self.sync_token = FULL_SYNC_TOKEN.to_string();
                return Err(e);
            }
        };
        for cmd in &commands {
            if let Some(message) = resp.sync_status.get(&cmd.uuid).and_then(|s| s.error()) {
                warn!("{} {} rejected: {message}", cmd.kind, cmd.uuid);
                self.sync_token = FULL_SYNC_TOKEN.to_string();
                return Err(ServiceError::Command {
                    command: cmd.kind.to_string(),
                    message,
                });
            }
        }
        info!("committed {} command(s)", commands.len());
        Ok(())
    }

    fn round_trip(&mut self, commands: Vec<Command>) -> Result<SyncResponse, ServiceError> {
        let request = SyncRequest::new(&self.sync_token, commands);
        let resp = self.service.sync(&request)?;
        self.merge(&resp);
        Ok(resp)
    }

    fn merge(&mut self, resp: &SyncResponse) {
        if resp.full_sync {
            self.projects = resp
                .projects
                .iter()
                .filter(|p| !p.is_deleted)
                .cloned()
                .collect();
            self.items = resp.items.clone();
        } else {
            for project in &resp.projects {
                let existing = self.projects.iter().position(|p| p.id == project.id);
                match (existing, project.is_deleted) {
                    (Some(idx), true) => {
                        self.projects.remove(idx);
                    }
                    (Some(idx), false) => self.projects[idx] = project.clone(),
                    (None, false) => self.projects.push(project.clone()),
                    (None, true) => {}
                }
            }
            for item in &resp.items {
                match self.items.iter_mut().find(|i| i.id == item.id) {
                    Some(cached) => *cached = item.clone(),
                    None => self.items.push(item.clone()),
                }
            }
        }
        self.sync_token = resp.sync_token.clone();
        info!(
            "synced (full={}, projects={}, items={})",
            resp.full_sync,
            resp.projects.len(),
            resp.items.len()
        );
    }

    // -- Projects --

    /// Projects in the order the service returned them.
    pub fn list_projects(&self) -> &[Project] {
        &self.projects
    }

    /// First project whose name equals `name` exactly.
    pub fn project_id_by_name(&self, name: &str) -> Option<&str> {
        self.projects
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id.as_str())
    }

    pub fn project_name(&self, id: &str) -> Option<&str> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    /// The project flagged as inbox, or failing that the one named "Inbox".
    pub fn inbox_project_id(&self) -> Option<&str> {
        self.projects
            .iter()
            .find(|p| p.inbox_project)
            .map(|p| p.id.as_str())
            .or_else(|| self.project_id_by_name(INBOX_NAME))
    }

    fn resolve_project(&self, project: &ProjectRef) -> Result<String, ServiceError> {
        let resolved = match project {
            ProjectRef::Id(id) => Some(id.as_str()),
            ProjectRef::Name(name) => self.project_id_by_name(name),
            ProjectRef::Inbox => self.inbox_project_id(),
        };
        resolved.map(String::from).ok_or_else(|| {
            ServiceError::InvalidInput(match project {
                ProjectRef::Id(id) => format!("unknown project id {id}"),
                ProjectRef::Name(name) => format!("unknown project {name}"),
                ProjectRef::Inbox => "no inbox project".into(),
            })
        })
    }

    // -- Items --

    pub fn list_items(&self, filter: &ItemFilter) -> Vec<&Item> {
        filter.apply(&self.items)
    }

    pub fn get_item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Inserts `new` at `new.order`, first moving every item of the target
    /// project at or after that position down by one, then commits and
    /// re-syncs.
    ///
    /// After a failed commit the cache may still hold an earlier shift, so
    /// the cache is refreshed before shifting again.
    pub fn add_item(&mut self, new: &NewItem) -> Result<(), ServiceError> {
        if self.sync_token == FULL_SYNC_TOKEN {
            self.sync()?;
        }
        let project_id = self.resolve_project(&new.project)?;

        if let Some(parent) = new.parent_id.as_deref().and_then(|id| self.get_item(id)) {
            if parent.indent + 1 != new.indent {
                warn!(
                    "indent {} for a child of {} (indent {}); the service nests by parent",
                    new.indent, parent.id, parent.indent
                );
            }
        }

        let filter = ItemFilter::for_reordering(&project_id);
        let changes = shift_orders(&mut self.items, &filter, new.order);
        if !changes.is_empty() {
            for change in &changes {
                debug!("item {} moves to order {}", change.id, change.item_order);
            }
            self.pending.push(Command::item_reorder(&changes));
        }

        self.pending.push(Command::item_add(&ItemAddArgs {
            content: new.content.clone(),
            project_id: project_id.clone(),
            child_order: new.order,
            parent_id: new.parent_id.clone(),
        }));
        info!(
            "adding {:?} to project {project_id} at order {} indent {}",
            new.content, new.order, new.indent
        );

        self.commit()?;
        self.sync()
    }

    pub fn complete_item(&mut self, id: &str) -> Result<(), ServiceError> {
        info!("completing item {id}");
        self.pending.push(Command::item_complete(id));
        self.commit()
    }

    pub fn all_ancestors(&self, item: &Item) -> Vec<&Item> {
        tree::all_ancestors(&self.items, item)
    }

    pub fn all_descendants<'a>(&'a self, item: &'a Item) -> Vec<&'a Item> {
        tree::all_descendants(&self.items, item)
    }
}
