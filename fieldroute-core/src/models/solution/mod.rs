//! Solution models: the route graph which keeps one forward-linked chain of stops per vehicle.

mod graph;
pub use self::graph::*;
