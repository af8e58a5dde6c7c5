// Domain layer: models and ports. No concrete IO here.

pub mod model;
pub mod ports;
