pub mod analytics;
pub mod core;
pub mod students;
