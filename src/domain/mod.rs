// Domain layer: models and ports. Store clients live in adapters.

pub mod model;
pub mod ports;
