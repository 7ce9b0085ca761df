//! Specifies logic to create a "pragmatic" solution and write it into json format.

mod model;
pub use self::model::*;

mod writer;
pub use self::writer::{create_no_demand_solution, create_solution};
