// Domain layer - Core naming rules and data structures

pub mod errors;
pub mod model;
pub mod rules;
