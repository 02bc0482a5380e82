pub mod catalog;
pub mod charts;
pub mod config;
pub mod dataset;
pub mod feed;
pub mod matches;
pub mod persist;
pub mod prediction;
pub mod prng;
pub mod profile;
pub mod state;
