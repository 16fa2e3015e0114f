pub mod combine;
pub mod list;
pub mod missing;
