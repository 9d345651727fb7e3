pub mod backup;
pub mod core;
pub mod lottery;
pub mod reviews;
pub mod roster;
