pub mod patch;
pub mod photo;
pub mod registry;
pub mod spatial_index;
pub mod photometric;
pub mod visibility;
pub mod visual_hull;
pub mod optimize;
pub mod seed;
pub mod runtime_parameters;
