//! Roadmap model: months and their ordered task lists.
//!
//! # Responsibility
//! - Seed the default nine-month roadmap.
//! - Expose month lookup and task sequence mutation helpers.
//! - Derive month selector options for the user-facing surface.
//!
//! # Invariants
//! - `months` length is fixed after construction.
//! - Task positions are indices into `Month::tasks` at render time.

use serde::{Deserialize, Serialize};

/// Month position inside the roadmap. Stable for the session lifetime.
pub type MonthIndex = usize;

/// Number of months seeded by [`Roadmap::default_months`].
pub const DEFAULT_MONTH_COUNT: usize = 9;

/// One roadmap month with its ordered task texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    /// Display name, e.g. `Month 1`.
    pub name: String,
    /// Built-in tasks first, custom tasks appended after them.
    pub tasks: Vec<String>,
}

impl Month {
    /// Creates a month with no tasks.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }
}

/// Ordered, fixed-length list of months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    months: Vec<Month>,
}

impl Roadmap {
    /// Builds a roadmap from caller-provided months, built-in tasks included.
    pub fn new(months: Vec<Month>) -> Self {
        Self { months }
    }

    /// Seeds `Month 1` through `Month 9`, all with empty task lists.
    pub fn default_months() -> Self {
        Self::new(
            (1..=DEFAULT_MONTH_COUNT)
                .map(|number| Month::empty(format!("Month {number}")))
                .collect(),
        )
    }

    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn month(&self, index: MonthIndex) -> Option<&Month> {
        self.months.get(index)
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Total number of tasks across all months.
    pub fn total_tasks(&self) -> usize {
        self.months.iter().map(|month| month.tasks.len()).sum()
    }

    /// Returns whether `text` appears at least once in the month.
    pub fn contains_task(&self, index: MonthIndex, text: &str) -> bool {
        self.month(index)
            .is_some_and(|month| month.tasks.iter().any(|task| task == text))
    }

    /// Appends one task to the month. Returns `false` for unknown months.
    pub fn append_task(&mut self, index: MonthIndex, text: impl Into<String>) -> bool {
        match self.months.get_mut(index) {
            Some(month) => {
                month.tasks.push(text.into());
                true
            }
            None => false,
        }
    }

    /// Removes the first occurrence of `text` from the month.
    ///
    /// Returns `false` when the month or the task does not exist.
    pub fn remove_first(&mut self, index: MonthIndex, text: &str) -> bool {
        let Some(month) = self.months.get_mut(index) else {
            return false;
        };
        match month.tasks.iter().position(|task| task == text) {
            Some(position) => {
                month.tasks.remove(position);
                true
            }
            None => false,
        }
    }

    /// Month selector entries as `(index, label)` pairs.
    ///
    /// Blank names fall back to `Month {index + 1}`.
    pub fn month_options(&self) -> Vec<(MonthIndex, String)> {
        self.months
            .iter()
            .enumerate()
            .map(|(index, month)| {
                let label = if month.name.trim().is_empty() {
                    format!("Month {}", index + 1)
                } else {
                    month.name.clone()
                };
                (index, label)
            })
            .collect()
    }
}

impl Default for Roadmap {
    fn default() -> Self {
        Self::default_months()
    }
}

/// Resolves a month selector value to a month index.
///
/// Reads an optional sign and the leading decimal digits after optional
/// whitespace. A value without a leading number resolves to month `0`.
/// Negative numbers and values past `usize::MAX` resolve to `None`, which
/// callers treat as an unknown month.
pub fn parse_month_selection(value: &str) -> Option<MonthIndex> {
    let rest = value.trim_start();
    let (negative, rest) = match rest.strip_prefix('-') {
        Some(unsigned) => (true, unsigned),
        None => (false, rest.strip_prefix('+').unwrap_or(rest)),
    };
    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    let digits = &rest[..digit_count];

    if digits.bytes().all(|byte| byte == b'0') {
        // No number at all, or a zero of either sign.
        return Some(0);
    }
    if negative {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_month_selection, Month, Roadmap, DEFAULT_MONTH_COUNT};

    #[test]
    fn default_months_are_named_and_empty() {
        let roadmap = Roadmap::default_months();
        assert_eq!(roadmap.len(), DEFAULT_MONTH_COUNT);
        assert_eq!(roadmap.months()[0].name, "Month 1");
        assert_eq!(roadmap.months()[8].name, "Month 9");
        assert_eq!(roadmap.total_tasks(), 0);
    }

    #[test]
    fn remove_first_only_drops_one_occurrence() {
        let mut roadmap = Roadmap::default_months();
        roadmap.append_task(2, "dup");
        roadmap.append_task(2, "dup");
        assert!(roadmap.remove_first(2, "dup"));
        assert_eq!(roadmap.month(2).unwrap().tasks, vec!["dup".to_string()]);
        assert!(!roadmap.remove_first(2, "missing"));
        assert!(!roadmap.remove_first(42, "dup"));
    }

    #[test]
    fn append_task_rejects_unknown_month() {
        let mut roadmap = Roadmap::default_months();
        assert!(!roadmap.append_task(9, "x"));
        assert_eq!(roadmap.total_tasks(), 0);
    }

    #[test]
    fn month_options_fall_back_for_blank_names() {
        let roadmap = Roadmap::new(vec![Month::empty("Kickoff"), Month::empty("  ")]);
        assert_eq!(
            roadmap.month_options(),
            vec![(0, "Kickoff".to_string()), (1, "Month 2".to_string())]
        );
    }

    #[test]
    fn month_selection_parses_leading_digits_or_defaults_to_zero() {
        assert_eq!(parse_month_selection("3"), Some(3));
        assert_eq!(parse_month_selection(" 4th"), Some(4));
        assert_eq!(parse_month_selection("+2"), Some(2));
        assert_eq!(parse_month_selection(""), Some(0));
        assert_eq!(parse_month_selection("abc"), Some(0));
        assert_eq!(parse_month_selection("-"), Some(0));
        assert_eq!(parse_month_selection("-0"), Some(0));
    }

    #[test]
    fn month_selection_rejects_negative_and_overflowing_numbers() {
        assert_eq!(parse_month_selection("-1"), None);
        assert_eq!(parse_month_selection(" -12abc"), None);
        assert_eq!(parse_month_selection("99999999999999999999999"), None);
    }
}
