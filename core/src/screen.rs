//! Presentation controller for the single todo screen.
//!
//! # Design
//! `TodoScreen` owns everything the screen shows: the in-memory list, the
//! new-item input, and the editing selection. It never performs I/O. Every
//! action that needs the server returns an [`Outbound`] request tagged with a
//! [`Ticket`]; the host executes it and hands the outcome back through
//! [`TodoScreen::complete`] or [`TodoScreen::fail`]. Completions are applied
//! in the order the host delivers them and nothing orders in-flight requests
//! against each other, so the last completion to touch the list wins.
//!
//! Failed completions are logged and leave the screen untouched. They are
//! also returned, but a host is free to drop them.
//!
//! Reordering is local only. The next refresh replaces the list with the
//! server's order.

use std::collections::HashMap;
use std::fmt;

use crate::client::TodoClient;
use crate::config::{ClientConfig, ResyncMode};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateTodo, TodoId, TodoItem, UpdateTodo};

/// Identifies one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request the host must execute, and the ticket to report it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Which item, if any, is being renamed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing { id: TodoId, draft: String },
}

impl EditState {
    pub fn editing_id(&self) -> Option<&TodoId> {
        match self {
            EditState::Idle => None,
            EditState::Editing { id, .. } => Some(id),
        }
    }
}

#[derive(Debug, Clone)]
enum Pending {
    Refresh,
    Create,
    Rename { id: TodoId },
    Toggle { id: TodoId },
    Delete { id: TodoId },
}

impl fmt::Display for Pending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pending::Refresh => write!(f, "refresh"),
            Pending::Create => write!(f, "create"),
            Pending::Rename { id } => write!(f, "rename {id}"),
            Pending::Toggle { id } => write!(f, "toggle {id}"),
            Pending::Delete { id } => write!(f, "delete {id}"),
        }
    }
}

#[derive(Debug)]
pub struct TodoScreen {
    client: TodoClient,
    resync: ResyncMode,
    items: Vec<TodoItem>,
    input: String,
    editing: EditState,
    pending: HashMap<Ticket, Pending>,
    next_ticket: u64,
}

impl TodoScreen {
    pub fn new(client: TodoClient, resync: ResyncMode) -> Self {
        Self {
            client,
            resync,
            items: Vec::new(),
            input: String::new(),
            editing: EditState::Idle,
            pending: HashMap::new(),
            next_ticket: 1,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(TodoClient::new(&config.base_url), config.resync)
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn editing(&self) -> &EditState {
        &self.editing
    }

    /// Number of requests handed out and not yet completed.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    fn issue(&mut self, pending: Pending, request: HttpRequest) -> Outbound {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        log::debug!("{ticket} {pending}: {} {}", request.method, request.path);
        self.pending.insert(ticket, pending);
        Outbound { ticket, request }
    }

    pub fn refresh(&mut self) -> Outbound {
        let request = self.client.build_list_todos();
        self.issue(Pending::Refresh, request)
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Create an item from the current input. An empty input is rejected
    /// without issuing a request.
    pub fn add(&mut self) -> Result<Outbound, ApiError> {
        let input = CreateTodo {
            title: self.input.clone(),
        };
        let request = self.client.build_create_todo(&input).inspect_err(|e| {
            log::debug!("not adding todo: {e}");
        })?;
        Ok(self.issue(Pending::Create, request))
    }

    /// Start renaming `id`, seeding the draft with its current title.
    /// Returns false when the item is not on screen.
    pub fn begin_edit(&mut self, id: &TodoId) -> bool {
        let Some(item) = self.items.iter().find(|item| &item.id == id) else {
            return false;
        };
        self.editing = EditState::Editing {
            id: item.id.clone(),
            draft: item.title.clone(),
        };
        true
    }

    /// Replace the draft text. Returns false when nothing is being edited.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        match &mut self.editing {
            EditState::Editing { draft, .. } => {
                *draft = text.into();
                true
            }
            EditState::Idle => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = EditState::Idle;
    }

    pub fn submit_edit(&mut self) -> Result<Outbound, ApiError> {
        let EditState::Editing { id, draft } = &self.editing else {
            return Err(ApiError::Validation("no todo is being edited".to_string()));
        };
        if draft.is_empty() {
            return Err(ApiError::Validation("title must not be empty".to_string()));
        }
        let request = self.client.build_update_todo(id, &UpdateTodo::title(draft.clone()))?;
        let id = id.clone();
        Ok(self.issue(Pending::Rename { id }, request))
    }

    /// Flip the completion flag of an on-screen item.
    pub fn toggle_complete(&mut self, id: &TodoId) -> Result<Outbound, ApiError> {
        let item = self
            .items
            .iter()
            .find(|item| &item.id == id)
            .ok_or(ApiError::NotFound)?;
        let request = self
            .client
            .build_update_todo(id, &UpdateTodo::completed(!item.completed))?;
        Ok(self.issue(Pending::Toggle { id: id.clone() }, request))
    }

    pub fn delete(&mut self, id: &TodoId) -> Outbound {
        let request = self.client.build_delete_todo(id);
        self.issue(Pending::Delete { id: id.clone() }, request)
    }

    /// Swap the item at `index` with its neighbour. Moving the first item up,
    /// the last item down, or an index past the end does nothing.
    pub fn move_item(&mut self, index: usize, direction: Direction) -> bool {
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => index.checked_add(1),
        };
        match target {
            Some(target) if index < self.items.len() && target < self.items.len() => {
                self.items.swap(index, target);
                true
            }
            _ => false,
        }
    }

    /// Apply the response to `ticket`. A returned `Outbound` is a follow-up
    /// refresh the host should execute next.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        response: HttpResponse,
    ) -> Result<Option<Outbound>, ApiError> {
        let Some(pending) = self.pending.remove(&ticket) else {
            log::warn!("ignoring response for unknown ticket {ticket}");
            return Ok(None);
        };
        log::debug!("{ticket} {pending}: HTTP {}", response.status);
        let label = pending.clone();
        self.apply(pending, response)
            .map_err(|e| report(ticket, &label, e))
    }

    /// Report that the request for `ticket` never got a response.
    pub fn fail(
        &mut self,
        ticket: Ticket,
        reason: impl Into<String>,
    ) -> Result<Option<Outbound>, ApiError> {
        self.fail_with(ticket, ApiError::Network(reason.into()))
    }

    pub fn fail_with(&mut self, ticket: Ticket, err: ApiError) -> Result<Option<Outbound>, ApiError> {
        match self.pending.remove(&ticket) {
            Some(pending) => Err(report(ticket, &pending, err)),
            None => {
                log::warn!("ignoring failure for unknown ticket {ticket}: {err}");
                Ok(None)
            }
        }
    }

    fn apply(
        &mut self,
        pending: Pending,
        response: HttpResponse,
    ) -> Result<Option<Outbound>, ApiError> {
        match pending {
            Pending::Refresh => {
                self.items = self.client.parse_list_todos(response)?;
                Ok(None)
            }
            Pending::Create => {
                let created = self.client.parse_create_todo(response)?;
                self.input.clear();
                Ok(self.resync(created, None))
            }
            Pending::Rename { id } => {
                let updated = self.client.parse_update_todo(response)?;
                if self.editing.editing_id() == Some(&id) {
                    self.editing = EditState::Idle;
                }
                Ok(self.resync(updated, Some(&id)))
            }
            Pending::Toggle { id } => {
                let updated = self.client.parse_update_todo(response)?;
                Ok(self.resync(updated, Some(&id)))
            }
            Pending::Delete { id } => {
                self.client.parse_delete_todo(response)?;
                self.items.retain(|item| item.id != id);
                Ok(None)
            }
        }
    }

    /// Bring the list back in line after a successful create (`target` is
    /// `None`) or update of `target`.
    fn resync(&mut self, returned: Option<TodoItem>, target: Option<&TodoId>) -> Option<Outbound> {
        if self.resync == ResyncMode::Merge {
            match returned {
                Some(item) if target.is_none_or(|id| *id == item.id) => {
                    if let Some(slot) = self.items.iter_mut().find(|i| i.id == item.id) {
                        *slot = item;
                        return None;
                    }
                    if target.is_none() {
                        self.items.push(item);
                        return None;
                    }
                }
                _ => {}
            }
            log::debug!("nothing to merge, re-fetching");
        }
        Some(self.refresh())
    }
}

fn report(ticket: Ticket, pending: &Pending, err: ApiError) -> ApiError {
    match pending {
        Pending::Delete { .. } => log::error!("{ticket} {pending} failed: {err}"),
        _ => log::warn!("{ticket} {pending} failed: {err}"),
    }
    err
}
