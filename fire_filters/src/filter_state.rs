//! Filter state registry for the wildfire views
//!
//! Owns one observable cell per filter. Map, chart and control widgets get
//! the registry (or clones of individual cells) injected and coordinate
//! through `get`/`set`/`subscribe` on the cells. The registry never derives
//! one cell from another and never validates a value.

use crate::dataflow::StateCell;
use shared::{FilterValues, MonthYear, NO_STATE_SELECTED, YearRange};

/// The six filter cells of a wildfire visualization session.
///
/// Cloning the registry clones the cell handles, so every clone observes
/// and writes the same values.
#[derive(Clone, Debug)]
pub struct FireFilters {
    /// Inclusive (min, max) range of fire years; an inverted range is accepted
    pub year_range: StateCell<YearRange>,

    /// Selected cause labels such as "Lightning", in selection order
    pub selected_causes: StateCell<Vec<String>>,

    /// Selected state name, or `"None"` when no state is selected
    pub selected_state: StateCell<String>,

    /// Month index under the pointer
    pub hovered_month: StateCell<Option<i32>>,

    /// Month index picked by the user
    pub selected_month: StateCell<Option<i32>>,

    /// Month and year picked together; independent of `selected_month`
    /// and `year_range`
    pub selected_month_year: StateCell<Option<MonthYear>>,

    defaults: FilterValues,
}

impl FireFilters {
    /// Creates the registry with the built-in defaults: years 2004-2015,
    /// no causes, no state, and nothing hovered or selected.
    pub fn new() -> Self {
        Self::with_defaults(FilterValues::default())
    }

    /// Creates the registry from custom starting values, which
    /// [`reset`](Self::reset) later returns to.
    pub fn with_defaults(defaults: FilterValues) -> Self {
        log::debug!("Creating filter registry with defaults {:?}", defaults);
        Self {
            year_range: StateCell::named("year_range", defaults.year_range),
            selected_causes: StateCell::named(
                "selected_causes",
                defaults.selected_causes.clone(),
            ),
            selected_state: StateCell::named(
                "selected_state",
                defaults.selected_state.clone(),
            ),
            hovered_month: StateCell::named("hovered_month", defaults.hovered_month),
            selected_month: StateCell::named("selected_month", defaults.selected_month),
            selected_month_year: StateCell::named(
                "selected_month_year",
                defaults.selected_month_year,
            ),
            defaults,
        }
    }

    pub fn defaults(&self) -> &FilterValues {
        &self.defaults
    }

    /// Current value of every cell.
    pub fn snapshot(&self) -> FilterValues {
        FilterValues {
            year_range: self.year_range.get(),
            selected_causes: self.selected_causes.get(),
            selected_state: self.selected_state.get(),
            hovered_month: self.hovered_month.get(),
            selected_month: self.selected_month.get(),
            selected_month_year: self.selected_month_year.get(),
        }
    }

    /// Writes every value into its cell. Each cell notifies its own
    /// subscribers, cells are written in declaration order.
    pub fn restore(&self, values: FilterValues) {
        let FilterValues {
            year_range,
            selected_causes,
            selected_state,
            hovered_month,
            selected_month,
            selected_month_year,
        } = values;

        self.year_range.set(year_range);
        self.selected_causes.set(selected_causes);
        self.selected_state.set(selected_state);
        self.hovered_month.set(hovered_month);
        self.selected_month.set(selected_month);
        self.selected_month_year.set(selected_month_year);
    }

    /// Restores the values the registry was created with.
    pub fn reset(&self) {
        log::debug!("Resetting filters to defaults");
        self.restore(self.defaults.clone());
    }

    pub fn is_state_selected(&self) -> bool {
        self.selected_state.with(|state| state != NO_STATE_SELECTED)
    }
}

impl Default for FireFilters {
    fn default() -> Self {
        Self::new()
    }
}
