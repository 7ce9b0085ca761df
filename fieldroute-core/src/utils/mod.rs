//! Various helpers.

mod timing;
pub use self::timing::Timer;
