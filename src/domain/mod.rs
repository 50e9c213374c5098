// Domain layer: ticket/inventory models and the ports the router talks through.

pub mod model;
pub mod ports;
