use anyhow::{anyhow, bail, Result};
use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use tasktty_core::{Item, ItemFilter, NewItem, ProjectRef};
use tasktty_service::{HttpService, SyncBackend, TaskStore};
use tracing::{debug, info, warn};

use crate::command::{self, Action};
use crate::components::action_indicator::ActionIndicator;
use crate::components::command_bar::CommandBar;
use crate::components::item_list::ItemList;
use crate::components::project_menu::ProjectMenu;
use crate::input::InputEvent;

pub const MENU_WIDTH: u16 = 25;
pub const ACTION_WIDTH: u16 = 15;
pub const COMMAND_HEIGHT: u16 = 2;

/// Everything the user has built up between two inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameState {
    pub buffer: String,
    /// Anchor for TASK BELOW and SUBTASK.
    pub selected: Option<Item>,
    pub active_action: usize,
    /// Failure of the last action, shown until the next key.
    pub error: Option<String>,
}

/// What the current buffer picks out of the store. Rebuilt after every
/// input, never edited in place.
#[derive(Debug, Clone, Default)]
pub struct View {
    pub project_ids: Vec<String>,
    /// Sorted by project (menu order), then item order.
    pub items: Vec<Item>,
    pub actions: Vec<Action>,
}

impl View {
    pub fn derive<B: SyncBackend>(state: &FrameState, store: &TaskStore<B>) -> Self {
        let tokens = command::project_tokens(&state.buffer);
        let terms = command::content_terms(&state.buffer);
        let projects = store.list_projects();

        let project_ids: Vec<String> = projects
            .iter()
            .filter(|p| command::project_matches(&p.name, &tokens))
            .map(|p| p.id.clone())
            .collect();
        let filter = if tokens.is_empty() {
            ItemFilter::default()
        } else {
            ItemFilter::in_projects(project_ids.iter().cloned())
        };

        let rank = |project_id: &str| {
            projects
                .iter()
                .position(|p| p.id == project_id)
                .unwrap_or(usize::MAX)
        };
        let mut items: Vec<Item> = store
            .list_items(&filter)
            .into_iter()
            .filter(|i| command::content_matches(&i.content, &terms))
            .cloned()
            .collect();
        items.sort_by_key(|i| (rank(&i.project_id), i.item_order));

        let actions = command::available_actions(
            items.len(),
            state.selected.is_some(),
            state.buffer.is_empty(),
        );
        Self {
            project_ids,
            items,
            actions,
        }
    }

    pub fn single_match(&self) -> Option<&Item> {
        match self.items.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<B = HttpService> {
    store: TaskStore<B>,
    state: FrameState,
    view: View,
}

impl<B: SyncBackend> App<B> {
    /// Expects an already synced store.
    pub fn new(store: TaskStore<B>) -> Self {
        let state = FrameState::default();
        let view = View::derive(&state, &store);
        Self { store, state, view }
    }

    pub fn state(&self) -> &FrameState {
        &self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn store(&self) -> &TaskStore<B> {
        &self.store
    }

    pub fn active_action(&self) -> Option<Action> {
        self.view.actions.get(self.state.active_action).copied()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        self.handle_event(InputEvent::from_key(key))
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Flow {
        let mut next = self.state.clone();
        if event.is_key() {
            next.error = None;
        }

        let flow = match event {
            InputEvent::Char(c) => {
                next.buffer.push(c);
                Flow::Continue
            }
            InputEvent::Backspace => {
                next.buffer.pop();
                Flow::Continue
            }
            InputEvent::NextAction => {
                if !self.view.actions.is_empty() {
                    next.active_action = (next.active_action + 1) % self.view.actions.len();
                }
                Flow::Continue
            }
            InputEvent::Dismiss => {
                if self.state.error.is_none() {
                    next.selected = None;
                }
                Flow::Continue
            }
            InputEvent::Submit => self.submit(&mut next),
            InputEvent::Resize => {
                debug!("terminal resized");
                Flow::Continue
            }
            InputEvent::Interrupt => Flow::Quit,
            InputEvent::Ignored => Flow::Continue,
        };

        self.state = next;
        self.refresh();
        flow
    }

    fn refresh(&mut self) {
        // The selection is a snapshot; follow the store when the task moved.
        let fresh = self
            .state
            .selected
            .as_ref()
            .and_then(|s| self.store.get_item(&s.id))
            .cloned();
        if fresh.is_some() {
            self.state.selected = fresh;
        }

        self.view = View::derive(&self.state, &self.store);
        if self.state.active_action >= self.view.actions.len() {
            self.state.active_action = 0;
        }
    }

    fn submit(&mut self, next: &mut FrameState) -> Flow {
        let Some(action) = self.active_action() else {
            return Flow::Continue;
        };
        info!("executing {action} with buffer {:?}", self.state.buffer);
        match self.execute(action, next) {
            Ok(flow) => flow,
            Err(e) => {
                warn!("{action} failed: {e:#}");
                next.error = Some(format!("{e:#}"));
                Flow::Continue
            }
        }
    }

    fn execute(&mut self, action: Action, next: &mut FrameState) -> Result<Flow> {
        match action {
            Action::Quit => return Ok(Flow::Quit),
            Action::Add => {
                let project = match self.view.project_ids.first() {
                    Some(id) => ProjectRef::Id(id.clone()),
                    None => ProjectRef::Inbox,
                };
                let new = NewItem::new(self.new_content()?, project);
                self.store.add_item(&new)?;
            }
            Action::AddTaskBelow => {
                let anchor = self.selection()?;
                let new = NewItem::new(self.new_content()?, ProjectRef::Id(anchor.project_id))
                    .at(anchor.item_order + 1, anchor.indent)
                    .under(anchor.parent_id);
                self.store.add_item(&new)?;
            }
            Action::AddSubtask => {
                let anchor = self.selection()?;
                let new = NewItem::new(self.new_content()?, ProjectRef::Id(anchor.project_id))
                    .at(anchor.item_order + 1, anchor.indent + 1)
                    .under(Some(anchor.id));
                self.store.add_item(&new)?;
            }
            Action::Complete => {
                let item = self.matched()?;
                self.store.complete_item(&item.id)?;
            }
            Action::Select => {
                next.selected = Some(self.matched()?);
            }
            Action::GotoProject => {
                let item = self.matched()?;
                let name = self
                    .store
                    .project_name(&item.project_id)
                    .ok_or_else(|| anyhow!("project {} is not in the cache", item.project_id))?;
                next.buffer = command::goto_buffer(name);
                next.active_action = 0;
                return Ok(Flow::Continue);
            }
        }
        next.buffer = command::collapse(&next.buffer);
        next.active_action = 0;
        Ok(Flow::Continue)
    }

    fn new_content(&self) -> Result<String> {
        let content = command::add_content(&self.state.buffer);
        if content.is_empty() {
            bail!("type the task text first");
        }
        Ok(content)
    }

    fn selection(&self) -> Result<Item> {
        self.state
            .selected
            .clone()
            .ok_or_else(|| anyhow!("no task selected"))
    }

    fn matched(&self) -> Result<Item> {
        self.view
            .single_match()
            .cloned()
            .ok_or_else(|| anyhow!("more than one task matches"))
    }

    pub fn render(&self, frame: &mut Frame) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(0)])
            .split(frame.area());

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(COMMAND_HEIGHT)])
            .split(columns[1]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(ACTION_WIDTH)])
            .split(rows[1]);

        ProjectMenu::new(self.store.list_projects(), &self.view.project_ids)
            .render(frame, columns[0]);
        ItemList::new(&self.view.items, self.state.selected.as_ref()).render(frame, rows[0]);
        CommandBar::new(
            &self.state.buffer,
            self.state.error.as_deref(),
            self.state.selected.as_ref(),
        )
        .render(frame, bottom[0]);
        ActionIndicator::new(self.active_action()).render(frame, bottom[1]);
    }
}
