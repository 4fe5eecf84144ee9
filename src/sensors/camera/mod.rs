extern crate nalgebra as na;

use na::{Matrix3, Matrix3x4, Matrix4x3, Vector3, Vector4};
use crate::{Float, PmvsError, PmvsResult};

/**
 * General projective camera given by a 3x4 projection matrix P.
 * The optical center, optical axis and the pseudo inverse are derived once at construction.
 */
#[allow(non_snake_case)]
#[derive(Debug,Clone)]
pub struct ProjectiveCamera {
    P: Matrix3x4<Float>,
    optical_center: Vector4<Float>,
    optical_axis: Vector4<Float>,
    pseudo_inverse: Matrix4x3<Float>
}

impl ProjectiveCamera {

    /**
     * Expects the 12 entries of P in row-major order.
     */
    #[allow(non_snake_case)]
    pub fn new(projection: &[Float]) -> PmvsResult<ProjectiveCamera> {
        if projection.len() != 12 {
            return Err(PmvsError::InvalidCalibration(format!("projection matrix has {} entries, expected 12", projection.len())));
        }
        let P = Matrix3x4::<Float>::from_row_slice(projection);
        ProjectiveCamera::from_matrix(&P)
    }

    #[allow(non_snake_case)]
    pub fn from_matrix(P: &Matrix3x4<Float>) -> PmvsResult<ProjectiveCamera> {
        let A: Matrix3<Float> = P.fixed_view::<3,3>(0,0).into_owned();
        let a: Vector3<Float> = P.column(3).into_owned();

        // P*C = 0 for C = (-A^-1 * a, 1)
        let center = A.lu().solve(&a).ok_or_else(|| PmvsError::InvalidCalibration("left 3x3 block of the projection matrix is singular".to_string()))?;
        let optical_center = Vector4::<Float>::new(-center[0], -center[1], -center[2], 1.0);
        let optical_axis = Vector4::<Float>::new(P[(2,0)], P[(2,1)], P[(2,2)], 0.0);

        // Minimum norm right inverse P^T (P P^T)^-1, i.e. P * P^+ = I
        let P_P_t_inv = (P*P.transpose()).try_inverse().ok_or_else(|| PmvsError::InvalidCalibration("projection matrix is rank deficient".to_string()))?;
        let pseudo_inverse = P.transpose()*P_P_t_inv;

        Ok(ProjectiveCamera{P: *P, optical_center, optical_axis, pseudo_inverse})
    }

    pub fn get_projection(&self) -> &Matrix3x4<Float> {
        &self.P
    }

    pub fn get_optical_center(&self) -> &Vector4<Float> {
        &self.optical_center
    }

    pub fn get_optical_axis(&self) -> &Vector4<Float> {
        &self.optical_axis
    }

    pub fn get_pseudo_inverse(&self) -> &Matrix4x3<Float> {
        &self.pseudo_inverse
    }

    /**
     * Homogeneous image coordinates P*X without the perspective divide.
     */
    pub fn project_homogeneous(&self, point: &Vector4<Float>) -> Vector3<Float> {
        self.P*point
    }

    /**
     * Pixel coordinates (x,y) of a homogeneous point. None if the homogeneous scale is zero.
     */
    pub fn project(&self, point: &Vector4<Float>) -> Option<(Float,Float)> {
        let p = self.project_homogeneous(point);
        match p[2] {
            w if w != 0.0 => Some((p[0]/w, p[1]/w)),
            _ => None
        }
    }

    /**
     * Euclidean distance between the optical center and a point with w = 1.
     */
    pub fn distance_to(&self, point: &Vector4<Float>) -> Float {
        (self.optical_center - point).norm()
    }
}
