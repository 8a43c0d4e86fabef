//! Debounced suggestion engine
//!
//! State machine over the search query: keystrokes (re)arm a 300 ms debounce
//! deadline, the event loop collects at most one due request per deadline,
//! and a monotonically increasing sequence number discards suggestion
//! results that arrive after a newer request has been issued.
//!
//! Time is injected as `Instant` arguments so the debounce behavior is
//! testable without sleeping.

use std::time::{Duration, Instant};

use crate::data::geocoding::{MAX_SUGGESTIONS, MIN_QUERY_LEN};
use crate::data::SearchSuggestion;

/// How long the query must be stable before a suggestion request fires
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// A suggestion request due for dispatch, tagged for staleness checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    /// Monotonic tag; results are dropped unless this is still the latest
    pub seq: u64,
    /// Query text the request was issued for
    pub query: String,
}

/// State of the search box and its suggestion panel
#[derive(Debug, Default)]
pub struct SearchBox {
    query: String,
    suggestions: Vec<SearchSuggestion>,
    panel_open: bool,
    selected: Option<usize>,
    deadline: Option<Instant>,
    latest_seq: u64,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current query text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current suggestion list (at most [`MAX_SUGGESTIONS`] entries)
    pub fn suggestions(&self) -> &[SearchSuggestion] {
        &self.suggestions
    }

    /// Index of the highlighted panel entry, if any
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Appends a character to the query
    pub fn push_char(&mut self, c: char, now: Instant) {
        self.query.push(c);
        self.on_query_changed(now);
    }

    /// Removes the last character of the query
    pub fn pop_char(&mut self, now: Instant) {
        self.query.pop();
        self.on_query_changed(now);
    }

    /// Resets the box after a submission: query cleared, panel hidden,
    /// pending debounce cancelled, and any in-flight request staled so a
    /// late response cannot repopulate the list.
    pub fn clear(&mut self) {
        self.query.clear();
        self.suggestions.clear();
        self.panel_open = false;
        self.selected = None;
        self.deadline = None;
        self.latest_seq += 1;
    }

    /// Hides the suggestion panel without touching the query remnants
    pub fn hide_panel(&mut self) {
        self.panel_open = false;
        self.selected = None;
    }

    /// Whether the panel should be drawn, given how many recent searches
    /// could be listed as a fallback when there are no suggestions
    pub fn panel_visible(&self, recent_len: usize) -> bool {
        self.panel_open
            && !self.query.is_empty()
            && (!self.suggestions.is_empty() || recent_len > 0)
    }

    /// Returns the suggestion request whose debounce deadline has passed,
    /// if any. At most one request is handed out per armed deadline.
    pub fn take_due_request(&mut self, now: Instant) -> Option<SuggestionRequest> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        self.deadline = None;
        self.latest_seq += 1;
        Some(SuggestionRequest {
            seq: self.latest_seq,
            query: self.query.clone(),
        })
    }

    /// Replaces the suggestion list with `results`, unless a newer request
    /// has been issued since `seq` (a stale response). Returns whether the
    /// results were applied.
    pub fn apply_results(&mut self, seq: u64, results: Vec<SearchSuggestion>) -> bool {
        if seq != self.latest_seq {
            return false;
        }

        self.suggestions = results;
        self.suggestions.truncate(MAX_SUGGESTIONS);
        self.panel_open = true;
        if self
            .selected
            .is_some_and(|index| index >= self.suggestions.len())
        {
            self.selected = None;
        }
        true
    }

    /// Moves the panel highlight down, wrapping to the top
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) => (index + 1) % len,
            None => 0,
        });
    }

    /// Moves the panel highlight up, wrapping to the bottom
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(index) => index - 1,
        });
    }

    fn on_query_changed(&mut self, now: Instant) {
        self.selected = None;
        self.panel_open = true;

        if self.query.chars().count() >= MIN_QUERY_LEN {
            // Re-arming replaces any previously armed deadline: classic
            // debounce, only the last keystroke in the window fires.
            self.deadline = Some(now + DEBOUNCE_WINDOW);
        } else {
            self.deadline = None;
            self.suggestions.clear();
        }
    }
}
