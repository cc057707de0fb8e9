//! Common utility functions

pub mod msisdn;
pub mod validation;

pub use msisdn::*;
pub use validation::*;
