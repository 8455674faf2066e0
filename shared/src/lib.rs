use serde::{Deserialize, Serialize};

// ===== FILTER VALUE TYPES =====

/// Sentinel stored in the selected-state cell when no state is selected.
pub const NO_STATE_SELECTED: &str = "None";

pub const DEFAULT_YEAR_RANGE: YearRange = YearRange::new(2004, 2015);

/// Inclusive range of fire years shown by the views.
///
/// `min <= max` is the intended use, but nothing rejects an inverted range.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

impl Default for YearRange {
    fn default() -> Self {
        DEFAULT_YEAR_RANGE
    }
}

impl From<(i32, i32)> for YearRange {
    fn from((min, max): (i32, i32)) -> Self {
        Self::new(min, max)
    }
}

impl From<YearRange> for (i32, i32) {
    fn from(range: YearRange) -> Self {
        (range.min, range.max)
    }
}

/// A single month of a single year, e.g. a bar picked in the monthly chart.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthYear {
    pub month: i32,
    pub year: i32,
}

impl MonthYear {
    pub const fn new(month: i32, year: i32) -> Self {
        Self { month, year }
    }
}

/// One value per filter cell.
///
/// Used both as the starting values of a filter registry and as a
/// point-in-time snapshot of it. Every field falls back to its default
/// when missing from a deserialized document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FilterValues {
    pub year_range: YearRange,
    pub selected_causes: Vec<String>,
    pub selected_state: String,
    pub hovered_month: Option<i32>,
    pub selected_month: Option<i32>,
    pub selected_month_year: Option<MonthYear>,
}

impl Default for FilterValues {
    fn default() -> Self {
        Self {
            year_range: DEFAULT_YEAR_RANGE,
            selected_causes: Vec::new(),
            selected_state: NO_STATE_SELECTED.to_string(),
            hovered_month: None,
            selected_month: None,
            selected_month_year: None,
        }
    }
}

// ===== CONFIG TYPES =====

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    pub app: AppSection,
    pub filters: FilterValues,
}

// Carries the config format version so older files can be told apart
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSection {
    pub version: String,
}

impl AppSection {
    /// Current configuration format version
    pub const CURRENT_VERSION: &'static str = "1.0.0";

    pub fn is_supported_version(&self) -> bool {
        self.version == Self::CURRENT_VERSION
    }
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION.to_string(),
        }
    }
}
