// Domain layer: value types and ports. Nothing here performs IO.

pub mod model;
pub mod ports;
