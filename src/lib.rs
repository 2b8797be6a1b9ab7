pub mod catalog;
pub mod export;
pub mod firebase;
pub mod generator;
pub mod models;
pub mod runner;
pub mod scrapers;
