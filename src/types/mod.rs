pub mod action;
pub mod raw_series;
pub mod signal;
