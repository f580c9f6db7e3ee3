use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;

use crate::app::Result;
use crate::domain::Release;
use crate::pipeline::LoadTicket;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(AppEvent::Key(key));
                }
            }
        }
        Ok(AppEvent::Tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    NextPane,
    PrevPane,
    FocusSearch,
    FocusFromDate,
    FocusToDate,
    ClearFilters,
    ToggleSort,
    ToggleTheme,
    OpenRelease,
    OpenCommit,
    DownloadWindows,
    DownloadLinux,
    /// The last rendered release came into view.
    LoadMore,
    None,
}

/// Results of background work, delivered to the UI loop over a channel.
#[derive(Debug)]
pub enum Message {
    FeedLoaded(Result<Vec<Release>>),
    BatchReady(LoadTicket),
}
