//! Tag actions - frequency counts over the published set

pub mod aggregate;

pub use aggregate::{aggregate_tags, count_tags};
