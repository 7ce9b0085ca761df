//! Problem domain models: locations with travel distances, shift teams and stops.

mod attributes;
pub use self::attributes::*;

mod builders;
pub use self::builders::*;

mod fleet;
pub use self::fleet::*;

mod stops;
pub use self::stops::*;

mod transport;
pub use self::transport::*;
