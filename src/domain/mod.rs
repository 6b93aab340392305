// Domain layer: document model and ports to external collaborators (storage, uploads).

pub mod model;
pub mod ports;
