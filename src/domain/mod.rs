// Domain layer: records, the closed enums around them, and the ports to external collaborators.

pub mod model;
pub mod ports;
