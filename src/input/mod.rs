pub mod counter;
pub mod editing;
pub mod phone;

pub use counter::{CharCount, CounterTier};
