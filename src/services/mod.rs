//! Import pipeline services

pub mod bulk;
pub mod cleanup;
pub mod company_import;
pub mod csv_source;
pub mod pi_import;
