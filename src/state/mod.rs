// View-state module.
// Holds the transient filter/sort/pagination selection for a session.

pub mod filter;

pub use filter::{FilterState, LanguageFilter, PAGE_SIZE, SortKey, apply, sort_repositories};
