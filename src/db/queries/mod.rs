//! Database queries

pub mod company;
pub mod pi;
