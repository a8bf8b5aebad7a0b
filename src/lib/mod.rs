//! Implementations that are useful accross the whole project
//!
//! Offerings and their catalog, the filter/sort/render pipeline, and the
//! widget that drives it

pub mod date;
pub mod detail;
pub mod error;
pub mod filter;
pub mod money;
pub mod offering;
pub mod parse;
pub mod project;
pub mod resolve;
pub mod sort;
pub mod view;
pub mod widget;
