pub mod catalog;
pub mod classifier;
pub mod error;
pub mod export;
pub mod generator;
pub mod responder;
