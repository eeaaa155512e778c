//! function-operator library crate
//!
//! This module exports the Function CRD definitions, the quantity parser,
//! and the admission validation pipeline with its configuration model.

pub mod crd;
pub mod quantity;
pub mod validation;

pub use crd::Function;
pub use quantity::{Quantity, QuantityError, Suffix};
pub use validation::{
    SourceVariant, ValidationConfig, ValidationError, Violation, ViolationKind, validate,
};
