// Library for tests to access modules

pub mod collector;
pub mod config;
pub mod evaluator;
pub mod models;
pub mod monitor;
pub mod notifier;
