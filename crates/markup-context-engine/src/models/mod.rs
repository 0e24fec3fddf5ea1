pub mod dialect;
pub mod probe;

pub use dialect::Dialect;
pub use probe::{Probe, offset_at};
