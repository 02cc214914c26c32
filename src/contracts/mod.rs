//! Contract bindings for the claim agent

pub mod distributor;
pub mod token;

pub use distributor::*;
pub use token::*;
