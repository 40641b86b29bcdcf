// src/utils/mod.rs

pub mod coerce;
pub mod pagination;
