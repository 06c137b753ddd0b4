//! Output side: CSV tables and PNG charts. The two are independent; callers decide
//! whether to produce one or both.

pub mod chart;
pub mod csv_export;
pub mod error;
