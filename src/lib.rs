pub mod calculator;
pub mod config;
pub mod dto;
pub mod error;
pub mod http;
pub mod operation;
pub mod registry;
pub mod service;
pub mod strategy;


pub use calculator::{Calculator, Chain};
pub use error::CalcError;
pub use operation::Operation;
pub use registry::StrategyRegistry;
pub use strategy::Strategy;
