// Library for tests to access modules

pub mod cache;
pub mod client;
pub mod collector;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod registry;
pub mod routes;
pub mod series;
pub mod version;
