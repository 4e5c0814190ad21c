pub mod builder;
pub mod error;
pub mod matrix;
pub mod scalar;

pub use builder::*;
pub use error::*;
pub use matrix::*;
pub use scalar::*;
