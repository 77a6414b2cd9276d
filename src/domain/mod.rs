// Domain layer: catalog data model and the definition source port.

pub mod model;
pub mod ports;
