pub mod crosstab;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod output;
pub mod quantile;
pub mod record;
pub mod scale;
pub mod selection;
pub mod source;
pub mod views;

pub use crosstab::{CrossTab, tabulate};
pub use error::ParseError;
pub use loader::{RawRow, load, load_csv};
pub use quantile::{GroupSummary, GroupedSummaries, summarize};
pub use record::{FamilySize, Record};
pub use selection::{FamilySelection, SelectionBroadcaster, SubscriptionId, family_selection};
