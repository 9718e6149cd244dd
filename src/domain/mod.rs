// Domain layer: pass-through row model, table-to-label mapping and the store ports.

pub mod model;
pub mod ports;
pub mod schema;
