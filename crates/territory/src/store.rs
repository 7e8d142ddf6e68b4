use std::sync::{Arc, Weak};

use foundation::math::GeoCoordinate;
use parking_lot::RwLock;

use crate::set::{Classification, TerritorySet};

/// Lifecycle of the territory dataset.
///
/// Pending → Loading → Ready | Unavailable. There is no way back: the
/// dataset is loaded at most once per store.
#[derive(Debug, Clone)]
pub enum DatasetState {
    Pending,
    Loading,
    Ready(Arc<TerritorySet>),
    Unavailable(String),
}

/// Coarse, copyable view of [`DatasetState`] for display.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DatasetStatus {
    Pending,
    Loading,
    Ready,
    Unavailable,
}

impl DatasetState {
    pub fn status(&self) -> DatasetStatus {
        match self {
            DatasetState::Pending => DatasetStatus::Pending,
            DatasetState::Loading => DatasetStatus::Loading,
            DatasetState::Ready(_) => DatasetStatus::Ready,
            DatasetState::Unavailable(_) => DatasetStatus::Unavailable,
        }
    }
}

/// What happened to a completed load.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The store was dropped before the load finished; the result went nowhere.
    Discarded,
}

/// Load-once cache for the territory dataset.
///
/// Classification never waits for a load: until the dataset is `Ready` every
/// query answers [`Classification::Unavailable`]. The store is the only strong
/// owner of its slot, so dropping it (for example when the hosting view is
/// torn down) turns any outstanding [`LoadTicket`] into a no-op.
#[derive(Debug)]
pub struct TerritoryStore {
    slot: Arc<RwLock<DatasetState>>,
}

/// Reason recorded when a ticket is dropped without being completed.
pub const ABANDONED_LOAD: &str = "dataset load abandoned";

/// One-shot handle for delivering the result of a dataset load.
///
/// Dropping an uncompleted ticket (loader panicked or was aborted) marks the
/// dataset `Unavailable` so the store never stays `Loading`.
#[derive(Debug)]
#[must_use = "a load ticket must be completed, or the store stays Loading"]
pub struct LoadTicket {
    slot: Weak<RwLock<DatasetState>>,
}

impl TerritoryStore {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(RwLock::new(DatasetState::Pending)),
        }
    }

    /// Store that is already `Ready` with the given dataset.
    pub fn ready(set: TerritorySet) -> Self {
        Self {
            slot: Arc::new(RwLock::new(DatasetState::Ready(Arc::new(set)))),
        }
    }

    /// Start the one and only load.
    ///
    /// Returns `None` if a load was already started, whatever its outcome.
    pub fn begin_load(&self) -> Option<LoadTicket> {
        let mut state = self.slot.write();
        if !matches!(*state, DatasetState::Pending) {
            return None;
        }
        *state = DatasetState::Loading;
        Some(LoadTicket {
            slot: Arc::downgrade(&self.slot),
        })
    }

    pub fn status(&self) -> DatasetStatus {
        self.slot.read().status()
    }

    /// Reason the dataset is unavailable, if it failed to load.
    pub fn failure(&self) -> Option<String> {
        match &*self.slot.read() {
            DatasetState::Unavailable(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// The loaded dataset, if ready.
    pub fn snapshot(&self) -> Option<Arc<TerritorySet>> {
        match &*self.slot.read() {
            DatasetState::Ready(set) => Some(Arc::clone(set)),
            _ => None,
        }
    }

    pub fn classify(&self, coord: GeoCoordinate) -> Classification {
        match self.snapshot() {
            Some(set) => set.classify(coord),
            None => Classification::Unavailable,
        }
    }
}

impl Default for TerritoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadTicket {
    /// Deliver the load result. Errors become `Unavailable` with their message.
    pub fn complete<E>(mut self, result: Result<TerritorySet, E>) -> Completion
    where
        E: std::fmt::Display,
    {
        // Leaves an empty Weak behind so Drop has nothing to abandon.
        let Some(slot) = std::mem::take(&mut self.slot).upgrade() else {
            return Completion::Discarded;
        };
        let next = match result {
            Ok(set) => DatasetState::Ready(Arc::new(set)),
            Err(e) => DatasetState::Unavailable(e.to_string()),
        };
        *slot.write() = next;
        Completion::Applied
    }
}

impl Drop for LoadTicket {
    fn drop(&mut self) {
        let Some(slot) = self.slot.upgrade() else {
            return;
        };
        let mut state = slot.write();
        if matches!(*state, DatasetState::Loading) {
            *state = DatasetState::Unavailable(ABANDONED_LOAD.to_string());
        }
    }
}
