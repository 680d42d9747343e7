use std::io::{self, Write};
use std::sync::Mutex;
use tracing::warn;
use wxlookup_core::{ConditionsCard, ForecastCard, ViewSink};

/// Writes regions to the terminal as they are filled in.
///
/// Hiding a region prints nothing; the user only sees what was shown.
#[derive(Debug, Default)]
pub struct TerminalView {
    loading: Mutex<bool>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn format_conditions(card: &ConditionsCard) -> String {
    format!(
        "{}\n  {}  {}\n  Humidity: {}\n  Wind: {}\n  Icon: {}\n",
        card.location, card.temperature, card.description, card.humidity, card.wind, card.icon_url
    )
}

pub fn format_forecast(cards: &[ForecastCard]) -> String {
    let mut out = String::new();
    for card in cards {
        out.push_str(&format!("  {:<10} {:>5}\n", card.weekday, card.temperature));
    }
    out
}

impl ViewSink for TerminalView {
    fn set_conditions(&self, card: Option<&ConditionsCard>) {
        if let Some(card) = card {
            print!("{}", format_conditions(card));
        }
    }

    fn set_forecast(&self, cards: &[ForecastCard]) {
        if !cards.is_empty() {
            print!("\nForecast:\n{}", format_forecast(cards));
        }
        if let Err(err) = io::stdout().flush() {
            warn!(error = %err, "failed to flush stdout");
        }
    }

    fn set_loading(&self, visible: bool) {
        let mut loading = self.loading.lock().unwrap_or_else(|e| e.into_inner());
        if visible && !*loading {
            eprintln!("Loading...");
        }
        *loading = visible;
    }

    fn set_error(&self, message: Option<&str>) {
        if let Some(message) = message {
            eprintln!("error: {message}");
        }
    }
}
