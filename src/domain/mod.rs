// Domain layer: models and ports. Only serde and std types leak in here.

pub mod model;
pub mod ports;
