// Domain layer: wire models and service ports. No HTTP or filesystem code here.

pub mod model;
pub mod ports;
