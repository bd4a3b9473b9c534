//! Pure marker math: facing quantization and edge projection

pub mod edge;
pub mod rotation;

pub use edge::{project_to_edge, project_to_edge_with_extent, MAP_EDGE};
pub use rotation::{map_yaw_to_rotation, wrap_degrees, DEGREES_PER_ROTATION};
