pub mod child;
pub mod log;
pub mod wizard;
