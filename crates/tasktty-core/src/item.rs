use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{wire, CoreError};

/// Legacy wire format of `due_date_utc`, e.g. `Fri 23 Mar 2018 20:59:59 +0000`.
pub const LEGACY_DUE_FORMAT: &str = "%a %d %b %Y %H:%M:%S %z";

/// A task as delivered by the remote service.
///
/// The `checked`, `is_deleted` and `is_archived` flags are optional: older
/// payloads omit some of them, and an absent flag never excludes an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireItem", into = "WireItem")]
pub struct Item {
    pub id: String,
    pub content: String,
    pub project_id: String,
    pub parent_id: Option<String>,
    pub item_order: i64,
    pub indent: i64,
    pub checked: Option<bool>,
    pub is_deleted: Option<bool>,
    pub is_archived: Option<bool>,
    pub due: Option<Due>,
}

impl Item {
    pub fn is_checked(&self) -> bool {
        self.checked.unwrap_or(false)
    }

    /// Horizontal offset of the item content in the item list.
    pub fn display_offset(&self) -> usize {
        self.indent.max(0) as usize * 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Due {
    pub date: DateTime<Utc>,
    pub all_day: bool,
}

impl Due {
    pub fn parse_legacy(raw: &str, all_day: bool) -> Result<Self, CoreError> {
        let date = DateTime::parse_from_str(raw, LEGACY_DUE_FORMAT)
            .map_err(|e| CoreError::InvalidDueDate(format!("{raw}: {e}")))?
            .with_timezone(&Utc);
        Ok(Self { date, all_day })
    }

    /// Parses the `due.date` field of newer payloads: a bare date means an
    /// all-day entry, anything longer carries a time of day.
    pub fn parse_iso(raw: &str) -> Result<Self, CoreError> {
        if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            let date = day.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
            return Ok(Self { date, all_day: true });
        }
        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self {
                date: date.with_timezone(&Utc),
                all_day: false,
            });
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|floating| Self {
                date: floating.and_utc(),
                all_day: false,
            })
            .map_err(|e| CoreError::InvalidDueDate(format!("{raw}: {e}")))
    }

    pub fn display(&self) -> String {
        if self.all_day {
            self.date.format("%d.%m.%Y").to_string()
        } else {
            self.date.format("%d.%m.%Y %H:%M").to_string()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireDue {
    date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireItem {
    #[serde(deserialize_with = "wire::id")]
    id: String,
    #[serde(default)]
    content: String,
    #[serde(deserialize_with = "wire::id")]
    project_id: String,
    #[serde(
        default,
        deserialize_with = "wire::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    parent_id: Option<String>,
    #[serde(default, alias = "child_order")]
    item_order: i64,
    #[serde(default = "default_indent")]
    indent: i64,
    #[serde(
        default,
        deserialize_with = "wire::opt_flag",
        skip_serializing_if = "Option::is_none"
    )]
    checked: Option<bool>,
    #[serde(
        default,
        deserialize_with = "wire::opt_flag",
        skip_serializing_if = "Option::is_none"
    )]
    is_deleted: Option<bool>,
    #[serde(
        default,
        deserialize_with = "wire::opt_flag",
        skip_serializing_if = "Option::is_none"
    )]
    is_archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date_utc: Option<String>,
    #[serde(default, deserialize_with = "wire::flag")]
    all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due: Option<WireDue>,
}

fn default_indent() -> i64 {
    1
}

impl From<WireItem> for Item {
    /// An unreadable due date is dropped rather than failing the whole sync.
    fn from(w: WireItem) -> Self {
        let parsed = match (w.due_date_utc.as_deref(), w.due.as_ref()) {
            (Some(raw), _) => Some(Due::parse_legacy(raw, w.all_day)),
            (None, Some(due)) => Some(Due::parse_iso(&due.date)),
            (None, None) => None,
        };
        let due = match parsed {
            Some(Ok(due)) => Some(due),
            Some(Err(e)) => {
                warn!("item {}: ignoring due date: {e}", w.id);
                None
            }
            None => None,
        };
        Item {
            id: w.id,
            content: w.content,
            project_id: w.project_id,
            parent_id: w.parent_id,
            item_order: w.item_order,
            indent: w.indent,
            checked: w.checked,
            is_deleted: w.is_deleted,
            is_archived: w.is_archived,
            due,
        }
    }
}

impl From<Item> for WireItem {
    fn from(item: Item) -> Self {
        WireItem {
            id: item.id,
            content: item.content,
            project_id: item.project_id,
            parent_id: item.parent_id,
            item_order: item.item_order,
            indent: item.indent,
            checked: item.checked,
            is_deleted: item.is_deleted,
            is_archived: item.is_archived,
            due_date_utc: item
                .due
                .map(|d| d.date.format(LEGACY_DUE_FORMAT).to_string()),
            all_day: item.due.is_some_and(|d| d.all_day),
            due: None,
        }
    }
}

/// How `NewItem::project` is resolved against the cached project list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRef {
    Id(String),
    Name(String),
    /// The service's default inbox project.
    Inbox,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub content: String,
    pub project: ProjectRef,
    pub order: i64,
    pub indent: i64,
    pub parent_id: Option<String>,
}

impl NewItem {
    pub fn new(content: impl Into<String>, project: ProjectRef) -> Self {
        Self {
            content: content.into(),
            project,
            order: 0,
            indent: 1,
            parent_id: None,
        }
    }

    pub fn at(mut self, order: i64, indent: i64) -> Self {
        self.order = order;
        self.indent = indent;
        self
    }

    pub fn under(mut self, parent_id: Option<String>) -> Self {
        self.parent_id = parent_id;
        self
    }
}

/// Item listing filter. The project set is applied first, then the three
/// exclusion flags.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub project_ids: Option<HashSet<String>>,
    pub include_checked: bool,
    pub include_deleted: bool,
    pub include_archived: bool,
}

impl ItemFilter {
    pub fn in_projects<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            project_ids: Some(ids.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// The view used when renumbering a project before an insert: checked
    /// and deleted items keep their order slots, archived ones do not.
    pub fn for_reordering(project_id: &str) -> Self {
        Self {
            include_checked: true,
            include_deleted: true,
            ..Self::in_projects([project_id])
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(ref ids) = self.project_ids {
            if !ids.contains(&item.project_id) {
                return false;
            }
        }
        if !self.include_checked && item.checked == Some(true) {
            return false;
        }
        if !self.include_deleted && item.is_deleted == Some(true) {
            return false;
        }
        if !self.include_archived && item.is_archived == Some(true) {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}
