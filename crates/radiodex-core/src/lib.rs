pub mod config;
pub mod controller;
pub mod directory;
pub mod favorites;
pub mod platform;
pub mod station;
