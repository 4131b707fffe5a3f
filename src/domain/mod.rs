// Domain layer: lab data types and the ports the exercises run through.

pub mod model;
pub mod ports;
