//! Core domain types and logic.

pub mod calendar;
pub mod price_table;
pub mod selection;
pub mod weights;
pub mod index_series;
pub mod calculator;
pub mod config_validation;
pub mod error;
