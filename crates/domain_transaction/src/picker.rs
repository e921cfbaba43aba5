//! Searchable pickers for clients and schemes
//!
//! A picker fetches its list once, then filters locally as the user types.

use std::future::Future;
use tracing::{debug, warn};

use core_kernel::{ApiResponse, Searchable};
use domain_client::Client;
use domain_fund::Scheme;

use crate::fetch::{FetchGeneration, FetchTicket};
use crate::ports::BrokeragePort;

/// Load state of a picker's list
#[derive(Debug, Clone, PartialEq)]
pub enum PickerState<T> {
    Idle,
    Loading,
    Ready(Vec<T>),
    Failed(String),
}

#[derive(Debug)]
pub struct Picker<T> {
    state: PickerState<T>,
    search: String,
    open: bool,
    selected: Option<T>,
    generation: FetchGeneration,
}

pub type ClientPicker = Picker<Client>;
pub type SchemePicker = Picker<Scheme>;

impl<T> Default for Picker<T> {
    fn default() -> Self {
        Self {
            state: PickerState::Idle,
            search: String::new(),
            open: false,
            selected: None,
            generation: FetchGeneration::new(),
        }
    }
}

impl<T: Searchable + Clone> Picker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PickerState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PickerState::Loading)
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Starts the one fetch a picker performs; `None` once loading or loaded
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        match self.state {
            PickerState::Idle | PickerState::Failed(_) => {
                self.state = PickerState::Loading;
                Some(self.generation.begin())
            }
            PickerState::Loading | PickerState::Ready(_) => None,
        }
    }

    /// Applies a list response; returns false if the fetch was superseded
    pub fn complete_fetch(&mut self, ticket: FetchTicket, envelope: ApiResponse<Vec<T>>) -> bool {
        if !self.generation.is_current(ticket) {
            debug!("Discarding stale picker response");
            return false;
        }
        self.state = match envelope.into_result() {
            Ok(items) => PickerState::Ready(items),
            Err(failure) => {
                warn!(error = %failure, "Picker list fetch failed");
                PickerState::Failed(failure.message)
            }
        };
        true
    }

    /// Fetches the list unless it is already loading or loaded
    pub async fn load_with<F, Fut>(&mut self, fetch: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResponse<Vec<T>>>,
    {
        if let Some(ticket) = self.begin_fetch() {
            let envelope = fetch().await;
            self.complete_fetch(ticket, envelope);
        }
    }

    /// Every loaded item
    pub fn items(&self) -> &[T] {
        match &self.state {
            PickerState::Ready(items) => items,
            _ => &[],
        }
    }

    /// Items matching the current search term, in list order
    pub fn visible(&self) -> Vec<&T> {
        self.items()
            .iter()
            .filter(|item| core_kernel::matches_term(item.search_fields(), &self.search))
            .collect()
    }

    /// Loaded, but nothing matches the search
    pub fn is_empty_result(&self) -> bool {
        matches!(self.state, PickerState::Ready(_)) && self.visible().is_empty()
    }

    /// Selects the item with `key` and closes the picker
    pub fn select(&mut self, key: &str) -> Option<T> {
        let item = self.items().iter().find(|item| item.search_key() == key).cloned()?;
        self.selected = Some(item.clone());
        self.open = false;
        Some(item)
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    /// Invalidates any outstanding fetch and forgets the list
    pub fn reset(&mut self) {
        self.generation.invalidate();
        *self = Self {
            generation: std::mem::take(&mut self.generation),
            ..Self::default()
        };
    }
}

impl Picker<Client> {
    /// Loads clients, logging records that fail the sanity check
    pub async fn load(&mut self, port: &dyn BrokeragePort) {
        self.load_with(|| port.list_clients()).await;
        for client in self.items() {
            if let Err(error) = client.check() {
                warn!(client_id = %client.id, %error, "Client record failed sanity check");
            }
        }
    }
}

impl Picker<Scheme> {
    pub async fn load(&mut self, port: &dyn BrokeragePort) {
        self.load_with(|| port.list_schemes()).await;
        for scheme in self.items() {
            if let Err(error) = scheme.check_invariants() {
                warn!(scheme_code = %scheme.scheme_code, %error, "Scheme record failed sanity check");
            }
        }
    }
}
