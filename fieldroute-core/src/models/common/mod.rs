//! Common models shared by problem and solution definitions.

mod domain;
pub use self::domain::*;

mod primitives;
pub use self::primitives::*;
