//! Observable filter state for the wildfire visualization front end.
//!
//! [`FireFilters`] holds one [`StateCell`](dataflow::StateCell) per filter
//! (year range, causes, state, hovered/selected month and a combined
//! month+year selection). Views read and write the cells and subscribe to
//! them to re-filter the fire records they draw.
//!
//! ```rust
//! use fire_filters::FireFilters;
//!
//! let filters = FireFilters::new();
//! let _subscription = filters.selected_causes.subscribe(|causes| {
//!     println!("causes: {causes:?}");
//! });
//!
//! filters
//!     .selected_causes
//!     .set(vec!["Lightning".to_string(), "Debris Burning".to_string()]);
//! ```

pub mod config;
pub mod dataflow;
pub mod filter_state;

pub use config::{ConfigError, load_config, load_config_or_default, parse_config, save_config};
pub use dataflow::{StateCell, Subscription};
pub use filter_state::FireFilters;
pub use shared::{FilterConfig, FilterValues, MonthYear, NO_STATE_SELECTED, YearRange};
