//! Display regions the pipeline writes to.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Text for the current-conditions card, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionsCard {
    pub location: String,
    pub temperature: String,
    pub description: String,
    pub icon_url: String,
    pub humidity: String,
    pub wind: String,
}

/// One card in the forecast strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    pub weekday: String,
    pub icon_url: String,
    pub temperature: String,
}

/// A fixed set of named regions. Implementations own no layout logic.
///
/// Methods take `&self` so one surface can be shared by overlapping lookups;
/// the last write to a region wins.
pub trait ViewSink: Send + Sync {
    /// `None` hides the conditions card.
    fn set_conditions(&self, card: Option<&ConditionsCard>);

    /// Replaces the whole forecast strip.
    fn set_forecast(&self, cards: &[ForecastCard]);

    fn set_loading(&self, visible: bool);

    /// `None` hides the error banner.
    fn set_error(&self, message: Option<&str>);

    /// Enables or disables the geolocation trigger.
    fn set_locate_enabled(&self, _enabled: bool) {}
}

/// Snapshot of every region held by a [`MemoryView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub conditions: Option<ConditionsCard>,
    pub forecast: Vec<ForecastCard>,
    pub loading: bool,
    pub error: Option<String>,
    pub locate_enabled: bool,
    /// Number of times loading was switched on.
    pub loading_shown: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            conditions: None,
            forecast: Vec::new(),
            loading: false,
            error: None,
            locate_enabled: true,
            loading_shown: 0,
        }
    }
}

/// Headless display surface that just remembers what was written.
#[derive(Debug, Default)]
pub struct MemoryView {
    state: Mutex<ViewState>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ViewState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ViewSink for MemoryView {
    fn set_conditions(&self, card: Option<&ConditionsCard>) {
        self.lock().conditions = card.cloned();
    }

    fn set_forecast(&self, cards: &[ForecastCard]) {
        self.lock().forecast = cards.to_vec();
    }

    fn set_loading(&self, visible: bool) {
        let mut state = self.lock();
        if visible {
            state.loading_shown += 1;
        }
        state.loading = visible;
    }

    fn set_error(&self, message: Option<&str>) {
        self.lock().error = message.map(str::to_string);
    }

    fn set_locate_enabled(&self, enabled: bool) {
        self.lock().locate_enabled = enabled;
    }
}
