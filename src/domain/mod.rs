// Domain layer: query/record models, the option catalog and the ports the service depends on.

pub mod catalog;
pub mod model;
pub mod ports;
