//! Platform-agnostic explorer logic. Nothing here touches Dioxus; every
//! pass is a pure function of the snapshot and the current selection.

pub mod colorscale;
pub mod filter;
pub mod format;
pub mod load;
pub mod options;
pub mod platform;
pub mod selection;
pub mod series;

#[cfg(test)]
pub(crate) mod fixtures;
