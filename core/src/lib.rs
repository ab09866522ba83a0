pub mod calendar;
pub mod config;
pub mod filter;
pub mod prompt;
pub mod storage;
pub mod time;
