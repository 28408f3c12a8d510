pub mod aggregator;
pub mod alerts;

pub use aggregator::aggregate;
pub use alerts::{AlertGenerator, AlertMessages};
