//! Parametric (delta-normal) Value-at-Risk.

mod delta_normal;

pub use delta_normal::{delta_normal_var, DeltaNormalInputs, DeltaNormalVar, VarError};
