//! Core type definitions

mod joint;
mod pose;
mod transform;

pub use joint::*;
pub use pose::*;
pub use transform::*;
