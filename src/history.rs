use std::{
    collections::VecDeque,
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use crate::capital::{ChineseAmount, is_valid_amount};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub amount: String,
    pub result: String,
    pub recorded_at_ms: u128,
}

/// Most recent successful conversions, newest first.
#[derive(Debug, Clone)]
pub struct ConversionHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    last_recorded: Option<String>,
}

impl ConversionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            last_recorded: None,
        }
    }

    /// Stores `amount` and its rendering unless the input is incomplete, the
    /// rendering is empty, or the same amount was the last one recorded.
    pub fn record(&mut self, amount: &str, result: &ChineseAmount) -> bool {
        if result.is_empty() || !is_valid_amount(amount) {
            return false;
        }
        if self.last_recorded.as_deref() == Some(amount) {
            return false;
        }

        self.entries.push_front(HistoryEntry {
            amount: amount.to_string(),
            result: result.as_str().to_string(),
            recorded_at_ms: now_ms(),
        });
        self.entries.truncate(self.capacity);
        self.last_recorded = Some(amount.to_string());
        true
    }

    /// Allows the last recorded amount to be recorded again.
    pub fn forget_last_recorded(&mut self) {
        self.last_recorded = None;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.last_recorded = None;
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capital::convert;

    fn record(history: &mut ConversionHistory, amount: &str) -> bool {
        let result = convert(amount).expect("convertible amount");
        history.record(amount, &result)
    }

    fn amounts(history: &ConversionHistory) -> Vec<&str> {
        history.entries().map(|e| e.amount.as_str()).collect()
    }

    #[test]
    fn newest_first_and_bounded() {
        let mut history = ConversionHistory::new(3);
        for amount in ["1", "2", "3", "4"] {
            assert!(record(&mut history, amount));
        }
        assert_eq!(amounts(&history), vec!["4", "3", "2"]);
        assert_eq!(history.len(), history.capacity());
    }

    #[test]
    fn skips_consecutive_duplicates_only() {
        let mut history = ConversionHistory::new(10);
        assert!(record(&mut history, "12.5"));
        assert!(!record(&mut history, "12.5"));
        assert!(record(&mut history, "8"));
        assert!(record(&mut history, "12.5"));
        assert_eq!(amounts(&history), vec!["12.5", "8", "12.5"]);
    }

    #[test]
    fn forgetting_last_allows_repeat() {
        let mut history = ConversionHistory::new(10);
        assert!(record(&mut history, "7"));
        history.forget_last_recorded();
        assert!(record(&mut history, "7"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn skips_incomplete_input() {
        let mut history = ConversionHistory::new(10);
        assert!(!record(&mut history, ""));
        assert!(!record(&mut history, "0"));
        assert!(!record(&mut history, ".5"));
        assert!(history.is_empty());
    }

    #[test]
    fn clear_resets_dedup() {
        let mut history = ConversionHistory::new(10);
        assert!(record(&mut history, "3"));
        history.clear();
        assert!(history.is_empty());
        assert!(record(&mut history, "3"));
        let entry = history.entries().next().expect("entry");
        assert_eq!(entry.result, "叁元整");
    }
}
