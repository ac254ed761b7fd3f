// Domain layer: core models and ports (interfaces). No dependencies on the engine itself.

pub mod model;
pub mod ports;
