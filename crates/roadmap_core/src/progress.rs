//! Progress and motivation engine.
//!
//! # Responsibility
//! - Map `(total tasks, checked tasks)` to a percentage and a motivation tier.
//!
//! # Invariants
//! - Pure: no logging, no persistence. Callers persist completion explicitly.
//! - Zero total tasks short-circuits to `0%` without dividing.
//! - `percent` is in `0..=100`.

use serde::{Deserialize, Serialize};

/// Motivation tier derived from percent complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Zero,
    Low,
    Medium,
    MedHigh,
    High,
    Complete,
}

impl Tier {
    /// Selects the tier for a percentage by descending threshold.
    pub fn for_percent(percent: u8) -> Self {
        match percent {
            100.. => Self::Complete,
            80..=99 => Self::High,
            50..=79 => Self::MedHigh,
            20..=49 => Self::Medium,
            1..=19 => Self::Low,
            0 => Self::Zero,
        }
    }

    /// Stable id shared with the presentation layer.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::MedHigh => "med_high",
            Self::High => "high",
            Self::Complete => "complete",
        }
    }

    /// Class list applied to the motivation message element.
    pub fn css_class(self) -> String {
        format!("motivation {}", self.as_str())
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Complete => {
                "Great job! You completed all tasks! Take that well deserved victory lap."
            }
            Self::High => "Getting so close! Keep up the focus and push through the final steps.",
            Self::MedHigh => "You are more than halfway there! Keep up the momentum.",
            Self::Medium => "Nice progress — steady wins the race. One task at a time!",
            Self::Low => {
                "Way to take your first step! You are off to a great start. Keep it going!"
            }
            Self::Zero => "Let's get started with your journey!",
        }
    }
}

/// Derived aggregate progress. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub percent: u8,
    pub tier: Tier,
}

impl Progress {
    pub fn message(&self) -> &'static str {
        self.tier.message()
    }
}

impl Default for Progress {
    fn default() -> Self {
        compute_progress(0, 0)
    }
}

/// Computes percent complete (round half up) and its tier.
pub fn compute_progress(total_tasks: usize, checked_count: usize) -> Progress {
    if total_tasks == 0 {
        return Progress {
            percent: 0,
            tier: Tier::Zero,
        };
    }

    let checked = checked_count.min(total_tasks) as u128;
    let total = total_tasks as u128;
    // round(100 * checked / total) with halves rounded up, in integers.
    let percent = ((200 * checked + total) / (2 * total)) as u8;
    Progress {
        percent,
        tier: Tier::for_percent(percent),
    }
}

#[cfg(test)]
mod tests {
    use super::{compute_progress, Tier};

    #[test]
    fn reference_points() {
        let cases = [
            ((0, 0), (0, Tier::Zero)),
            ((5, 5), (100, Tier::Complete)),
            ((4, 3), (75, Tier::MedHigh)),
            ((10, 2), (20, Tier::Medium)),
            ((10, 8), (80, Tier::High)),
            ((3, 0), (0, Tier::Zero)),
        ];
        for ((total, checked), (percent, tier)) in cases {
            let progress = compute_progress(total, checked);
            assert_eq!(progress.percent, percent, "total={total} checked={checked}");
            assert_eq!(progress.tier, tier, "total={total} checked={checked}");
        }
    }

    #[test]
    fn rounds_half_up() {
        // 1/8 = 12.5%
        assert_eq!(compute_progress(8, 1).percent, 13);
        // 1/3 = 33.33%
        assert_eq!(compute_progress(3, 1).percent, 33);
        // 1/200 = 0.5% lands in the low tier.
        let progress = compute_progress(200, 1);
        assert_eq!(progress.percent, 1);
        assert_eq!(progress.tier, Tier::Low);
    }

    #[test]
    fn near_complete_rounds_into_complete_tier() {
        let progress = compute_progress(200, 199);
        assert_eq!(progress.percent, 100);
        assert_eq!(progress.tier, Tier::Complete);
    }

    #[test]
    fn checked_count_above_total_is_clamped() {
        assert_eq!(compute_progress(2, 5).percent, 100);
    }

    #[test]
    fn tier_ids_and_messages() {
        assert_eq!(Tier::MedHigh.as_str(), "med_high");
        assert_eq!(Tier::Low.css_class(), "motivation low");
        assert_eq!(Tier::Zero.message(), "Let's get started with your journey!");
    }
}
