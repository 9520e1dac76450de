pub mod classify;
pub mod import;
pub mod list;
pub mod tags;
