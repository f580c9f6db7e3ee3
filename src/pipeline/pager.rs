/// Number of releases revealed per batch.
pub const BATCH_SIZE: usize = 20;

/// Proof that a load was started against a particular generation of the
/// paged list. A `reset` makes outstanding tickets stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Reveals a growing prefix of a list in fixed-size batches.
#[derive(Debug, Clone)]
pub struct Pager<T> {
    items: Vec<T>,
    shown: usize,
    batch_size: usize,
    loading: bool,
    generation: u64,
}

impl<T> Pager<T> {
    pub fn new() -> Self {
        Self::with_batch_size(BATCH_SIZE)
    }

    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            items: Vec::new(),
            shown: 0,
            batch_size: batch_size.max(1),
            loading: false,
            generation: 0,
        }
    }

    /// Replace the paged list and show only its first batch.
    pub fn reset(&mut self, items: Vec<T>) {
        self.shown = items.len().min(self.batch_size);
        self.items = items;
        self.loading = false;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Start loading the next batch. Returns `None` when a load is already in
    /// flight or everything is shown.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.loading || !self.has_more() {
            return None;
        }
        self.loading = true;
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Reveal the next batch for a ticket from `begin_load`. Stale tickets
    /// are ignored; returns whether the window grew.
    pub fn finish_load(&mut self, ticket: LoadTicket) -> bool {
        if ticket.generation != self.generation || !self.loading {
            tracing::debug!("Dropping stale batch load");
            return false;
        }
        self.loading = false;
        let before = self.shown;
        self.shown = (self.shown + self.batch_size).min(self.items.len());
        self.shown > before
    }

    pub fn displayed(&self) -> &[T] {
        &self.items[..self.shown]
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn has_more(&self) -> bool {
        self.shown < self.items.len()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Everything is shown and there was something to show.
    pub fn is_exhausted(&self) -> bool {
        !self.items.is_empty() && !self.has_more()
    }
}

impl<T> Default for Pager<T> {
    fn default() -> Self {
        Self::new()
    }
}
