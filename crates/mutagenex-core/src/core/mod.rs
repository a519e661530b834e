pub mod locator;
pub mod models;
pub mod spec;
