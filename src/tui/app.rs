use std::sync::Arc;

use ratatui::widgets::ListState;

use crate::app::{Result, ThemeContext};
use crate::domain::Release;
use crate::pipeline::{self, BoundKind, DateBound, FilterCriteria, LoadTicket, Pager, SortOrder};
use crate::store::{FeedState, ReleaseStore};
use crate::tui::viewport::ProximityWatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Releases,
    Details,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Releases => ActivePane::Details,
            ActivePane::Details => ActivePane::Releases,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

/// Filter bar field currently receiving keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Search,
    FromDate,
    ToDate,
}

/// What the release section shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseView<'a> {
    Loading,
    Error(&'a str),
    NoResults,
    Results,
}

pub const PAGE_SIZE: usize = 10;

pub struct TuiApp {
    pub store: ReleaseStore,
    pub criteria: FilterCriteria,
    pub pager: Pager<Arc<Release>>,
    pub theme: ThemeContext,
    pub active_pane: ActivePane,
    pub input: Option<InputField>,
    pub release_index: usize,
    pub release_list_state: ListState,
    pub detail_scroll: u16,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub watcher: ProximityWatcher,
    /// Set by the layout after each draw.
    pub tail_visible: bool,
}

impl TuiApp {
    pub fn new(theme: ThemeContext, sort: SortOrder) -> Self {
        Self {
            store: ReleaseStore::new(),
            criteria: FilterCriteria {
                sort,
                ..FilterCriteria::default()
            },
            pager: Pager::new(),
            theme,
            active_pane: ActivePane::Releases,
            input: None,
            release_index: 0,
            release_list_state: ListState::default(),
            detail_scroll: 0,
            should_quit: false,
            status_message: None,
            watcher: ProximityWatcher::new(),
            tail_visible: false,
        }
    }

    pub fn view(&self) -> ReleaseView<'_> {
        match self.store.state() {
            FeedState::Loading => ReleaseView::Loading,
            FeedState::Failed(msg) => ReleaseView::Error(msg.as_str()),
            FeedState::Loaded(_) if self.pager.total() == 0 => ReleaseView::NoResults,
            FeedState::Loaded(_) => ReleaseView::Results,
        }
    }

    pub fn feed_loaded(&mut self, result: Result<Vec<Release>>) {
        if self.store.complete(result) {
            self.refilter();
        }
    }

    /// Re-run the filter pipeline and go back to the first batch.
    pub fn refilter(&mut self) {
        let visible = pipeline::apply(self.store.releases(), &self.criteria);
        tracing::debug!(
            "Filter matched {} of {} releases",
            visible.len(),
            self.store.releases().len()
        );
        self.pager.reset(visible);
        self.watcher.reset();
        self.release_index = 0;
        self.detail_scroll = 0;
        self.sync_selection();
    }

    pub fn displayed(&self) -> &[Arc<Release>] {
        self.pager.displayed()
    }

    pub fn selected_release(&self) -> Option<&Arc<Release>> {
        self.displayed().get(self.release_index)
    }

    pub fn input_value(&self, field: InputField) -> &str {
        match field {
            InputField::Search => &self.criteria.search,
            InputField::FromDate => &self.criteria.from,
            InputField::ToDate => &self.criteria.to,
        }
    }

    fn input_value_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::Search => &mut self.criteria.search,
            InputField::FromDate => &mut self.criteria.from,
            InputField::ToDate => &mut self.criteria.to,
        }
    }

    pub fn focus_input(&mut self, field: InputField) {
        self.input = Some(field);
    }

    pub fn blur_input(&mut self) {
        self.input = None;
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.input {
            self.input_value_mut(field).push(c);
            self.refilter();
        }
    }

    pub fn input_backspace(&mut self) {
        if let Some(field) = self.input {
            if self.input_value_mut(field).pop().is_some() {
                self.refilter();
            }
        }
    }

    /// Whether a non-empty date field fails to parse.
    pub fn is_bound_invalid(&self, field: InputField) -> bool {
        match field {
            InputField::Search => false,
            InputField::FromDate => {
                DateBound::parse(&self.criteria.from, BoundKind::Lower).is_invalid()
            }
            InputField::ToDate => {
                DateBound::parse(&self.criteria.to, BoundKind::Upper).is_invalid()
            }
        }
    }

    pub fn clear_filters(&mut self) {
        self.input = None;
        if !self.criteria.is_empty() {
            self.criteria.clear();
            self.refilter();
        }
    }

    pub fn toggle_sort(&mut self) {
        self.criteria.sort = self.criteria.sort.toggle();
        self.refilter();
    }

    pub fn begin_load_more(&mut self) -> Option<LoadTicket> {
        self.pager.begin_load()
    }

    pub fn finish_load_more(&mut self, ticket: LoadTicket) {
        if self.pager.finish_load(ticket) {
            tracing::debug!(
                "Showing {} of {} releases",
                self.pager.displayed().len(),
                self.pager.total()
            );
        }
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Releases => self.select(self.release_index.saturating_sub(1)),
            ActivePane::Details => self.detail_scroll = self.detail_scroll.saturating_sub(1),
        }
    }

    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Releases => self.select(self.release_index + 1),
            ActivePane::Details => self.detail_scroll = self.detail_scroll.saturating_add(1),
        }
    }

    pub fn next_page(&mut self) {
        match self.active_pane {
            ActivePane::Releases => self.select(self.release_index + PAGE_SIZE),
            ActivePane::Details => {
                self.detail_scroll = self.detail_scroll.saturating_add(PAGE_SIZE as u16)
            }
        }
    }

    pub fn prev_page(&mut self) {
        match self.active_pane {
            ActivePane::Releases => self.select(self.release_index.saturating_sub(PAGE_SIZE)),
            ActivePane::Details => {
                self.detail_scroll = self.detail_scroll.saturating_sub(PAGE_SIZE as u16)
            }
        }
    }

    fn select(&mut self, index: usize) {
        let max_index = self.displayed().len().saturating_sub(1);
        let index = index.min(max_index);
        if index != self.release_index {
            self.release_index = index;
            self.detail_scroll = 0;
        }
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        if self.displayed().is_empty() {
            self.release_list_state.select(None);
            *self.release_list_state.offset_mut() = 0;
        } else {
            self.release_list_state.select(Some(self.release_index));
        }
    }

    pub fn toggle_theme(&mut self) {
        match self.theme.toggle() {
            Ok(theme) => self.set_status(format!("Theme: {}", theme)),
            Err(e) => {
                tracing::error!("Failed to persist theme: {}", e);
                self.set_status(format!("Failed to save theme: {}", e));
            }
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
