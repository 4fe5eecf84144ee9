extern crate nalgebra as na;

use na::{Vector,Matrix3,U3,U1,base::storage::Storage};
use crate::Float;

/**
 * Cross product matrix [w]x such that [w]x * v = w x v
 */
pub fn skew_symmetric<T>(w: &Vector<Float,U3,T>) -> Matrix3<Float> where T: Storage<Float,U3,U1>  {
    Matrix3::<Float>::new(0.0, -w[2], w[1],
                          w[2], 0.0, -w[0],
                          -w[1], w[0], 0.0)
}
