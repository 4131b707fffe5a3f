pub mod car_info;
pub mod dimensions;
pub mod runner;
pub mod temperature;
pub mod traversal;

pub use crate::domain::model::{Graph, GridSpec, TemperatureGrid, TraversalOutcome};
pub use crate::domain::ports::{Exercise, Output, Traversal};
pub use crate::utils::error::Result;
