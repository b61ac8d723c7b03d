// Library for tests to access modules

pub mod binner;
pub mod config;
pub mod consolidate;
pub mod crash_repo;
pub mod date_range;
pub mod models;
pub mod query;
pub mod routes;
pub mod version;
