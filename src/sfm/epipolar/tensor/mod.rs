extern crate nalgebra as na;

pub mod fundamental;

use na::Matrix3;
use crate::Float;

pub type Fundamental = Matrix3<Float>;
