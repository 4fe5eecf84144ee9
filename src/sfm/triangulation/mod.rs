extern crate nalgebra as na;

use na::{Matrix3x4, Matrix4, Matrix4x2, Vector3, Vector4, RowVector4};
use crate::{Float, PmvsError, PmvsResult};
use crate::sfm::epipolar::{epipolar_line, tensor::Fundamental};

/**
 * Finds X such that P_one*X = (x_one, y_one, 1) exactly and the projection of X in the
 * second view is the point on the epipolar line closest to (x_two, y_two).
 * The second constraint is the line through (x_two, y_two) perpendicular to the epipolar line.
 * Returns X with w = 1.
 */
#[allow(non_snake_case)]
pub fn triangulate(x_one: Float, y_one: Float, x_two: Float, y_two: Float, P_one: &Matrix3x4<Float>, P_two: &Matrix3x4<Float>, F: &Fundamental) -> PmvsResult<Vector4<Float>> {
    let line = epipolar_line(F, x_one, y_one);
    let line_perp = Vector3::<Float>::new(-line[1], line[0], line[1]*x_two - line[0]*y_two);
    let perp_constraint: Vector4<Float> = P_two.transpose()*line_perp;

    let mut A = Matrix4::<Float>::zeros();
    A.fixed_view_mut::<3,4>(0,0).copy_from(P_one);
    A.set_row(3, &RowVector4::<Float>::new(perp_constraint[0], perp_constraint[1], perp_constraint[2], perp_constraint[3]));
    let b = Vector4::<Float>::new(x_one, y_one, 1.0, 0.0);

    let X = A.lu().solve(&b).ok_or_else(|| PmvsError::DegenerateGeometry("triangulation system is singular".to_string()))?;
    match X[3] {
        w if w != 0.0 && X.iter().all(|v| v.is_finite()) => Ok(X/w),
        _ => Err(PmvsError::DegenerateGeometry("triangulated point lies at infinity".to_string()))
    }
}

/**
 * Tangent plane basis (right, up) of a patch with respect to the reference projection P.
 * Solves [P; n^T] * [right|up] = [e1|e2] and scales both by the depth of the center,
 * so that a unit step along right/up moves the projection by one pixel in the reference image.
 */
#[allow(non_snake_case)]
pub fn patch_vectors(P: &Matrix3x4<Float>, center: &Vector4<Float>, normal: &Vector4<Float>) -> PmvsResult<(Vector4<Float>,Vector4<Float>)> {
    let mut A = Matrix4::<Float>::zeros();
    A.fixed_view_mut::<3,4>(0,0).copy_from(P);
    A.set_row(3, &normal.transpose());

    let mut b = Matrix4x2::<Float>::zeros();
    b[(0,0)] = 1.0;
    b[(1,1)] = 1.0;

    let basis = A.lu().solve(&b).ok_or_else(|| PmvsError::DegenerateGeometry("tangent plane system is singular".to_string()))?;
    let depth = P.row(2).transpose().dot(center);
    let right: Vector4<Float> = basis.column(0)*depth;
    let up: Vector4<Float> = basis.column(1)*depth;

    match right.iter().chain(up.iter()).all(|v| v.is_finite()) {
        true => Ok((right, up)),
        false => Err(PmvsError::DegenerateGeometry("tangent plane vectors are not finite".to_string()))
    }
}
