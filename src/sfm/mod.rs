pub mod epipolar;
pub mod triangulation;
