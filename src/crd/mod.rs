//! Custom Resource Definitions (CRDs) for function-operator.
//!
//! - `Function`: a serverless workload built and run by the platform

mod function;

pub use function::*;
