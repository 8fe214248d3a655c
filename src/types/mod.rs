//! Type definitions

pub mod company;
pub mod import;
pub mod pi;

pub use company::*;
pub use import::*;
pub use pi::*;
