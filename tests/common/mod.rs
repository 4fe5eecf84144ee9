#![allow(dead_code)]
extern crate nalgebra as na;

use na::{Matrix3, Matrix3x4, Rotation3, Vector3, Vector4};
use pmvs::{Float, MatchingParameters, PhotoRegistry};
use pmvs::image::{Image, Mask, features::{Feature, FeatureType}};

pub const WIDTH: usize = 100;
pub const HEIGHT: usize = 100;
pub const FOCAL: Float = 100.0;
pub const CAMERA_DISTANCE: Float = 10.0;

pub fn intrinsics() -> Matrix3<Float> {
    Matrix3::<Float>::new(FOCAL, 0.0, (WIDTH/2) as Float,
                          0.0, FOCAL, (HEIGHT/2) as Float,
                          0.0, 0.0, 1.0)
}

/**
 * Row-major entries of K[R | -R*C].
 */
#[allow(non_snake_case)]
pub fn projection(rotation: &Matrix3<Float>, center: &Vector3<Float>) -> Vec<Float> {
    let mut P = Matrix3x4::<Float>::zeros();
    P.fixed_view_mut::<3,3>(0,0).copy_from(rotation);
    P.set_column(3, &(-rotation*center));
    let P = intrinsics()*P;
    (0..3).flat_map(|r| (0..4).map(move |c| (r,c))).map(|(r,c)| P[(r,c)]).collect()
}

pub fn rotation_y(degrees: Float) -> Matrix3<Float> {
    *Rotation3::<Float>::from_axis_angle(&Vector3::<Float>::y_axis(), degrees.to_radians()).matrix()
}

pub fn rotation_x(degrees: Float) -> Matrix3<Float> {
    *Rotation3::<Float>::from_axis_angle(&Vector3::<Float>::x_axis(), degrees.to_radians()).matrix()
}

/**
 * Smooth, non periodic color texture of the plane Z = 0.
 */
pub fn texture(x: Float, y: Float, channel: usize) -> Float {
    match channel {
        0 => 0.5 + 0.25*(7.0*x).sin() + 0.2*(5.0*y).cos(),
        1 => 0.5 + 0.3*(4.0*x + 6.0*y).sin(),
        _ => 0.5 + 0.3*(6.0*x - 3.0*y).cos()
    }
}

/**
 * Photo of the textured plane Z = 0 taken by an unrotated camera at (center_x, center_y, -CAMERA_DISTANCE).
 * Pixel (y,x) sees the plane point (center_x + (x - 50)/10, center_y + (y - 50)/10).
 */
pub fn plane_image(center_x: Float, center_y: Float) -> Image {
    let scale = CAMERA_DISTANCE/FOCAL;
    Image::from_fn(WIDTH, HEIGHT, 3, |y,x,c| {
        let world_x = center_x + (x as Float - (WIDTH/2) as Float)*scale;
        let world_y = center_y + (y as Float - (HEIGHT/2) as Float)*scale;
        texture(world_x, world_y, c)
    })
}

pub fn constant_image(width: usize, height: usize, value: Float) -> Image {
    Image::from_fn(width, height, 3, |_,_,_| value)
}

pub fn plane_camera_centers() -> Vec<Vector3<Float>> {
    vec![
        Vector3::<Float>::new(0.0, 0.0, -CAMERA_DISTANCE),
        Vector3::<Float>::new(1.0, 0.0, -CAMERA_DISTANCE),
        Vector3::<Float>::new(-1.0, 0.0, -CAMERA_DISTANCE),
        Vector3::<Float>::new(0.0, 1.0, -CAMERA_DISTANCE)
    ]
}

/**
 * The world origin seen by photo 0 (reference) at (50,50) and by photos 1,2,3 at (40,50), (60,50), (50,40).
 */
pub fn plane_scene_with(parameters: MatchingParameters, masks: Option<Vec<Mask>>) -> PhotoRegistry {
    let centers = plane_camera_centers();
    let images = centers.iter().map(|c| plane_image(c[0], c[1])).collect::<Vec<Image>>();
    let projections = centers.iter().map(|c| projection(&Matrix3::<Float>::identity(), c)).collect::<Vec<Vec<Float>>>();
    let mut registry = PhotoRegistry::new(images, masks, &projections, parameters).expect("plane scene");

    registry.set_features(0, &[Feature::new(50, 50, 1.0, FeatureType::DoG)]);
    registry.set_features(1, &[Feature::new(40, 50, 0.8, FeatureType::DoG), Feature::new(10, 90, 0.9, FeatureType::DoG), Feature::new(40, 50, 0.7, FeatureType::Harris)]);
    registry.set_features(2, &[Feature::new(85, 15, 0.9, FeatureType::DoG), Feature::new(60, 50, 0.8, FeatureType::DoG)]);
    registry.set_features(3, &[Feature::new(50, 40, 0.8, FeatureType::DoG), Feature::new(90, 90, 0.5, FeatureType::DoG)]);
    registry
}

/**
 * Photo of the plane Z = 0 by a camera with rotation R (world to camera) at `center`.
 * Every pixel ray is intersected with the plane, the texture is sampled at half frequency
 * so nearest pixel resampling in oblique views stays correlated.
 */
pub fn rendered_plane_image(rotation: &Matrix3<Float>, center: &Vector3<Float>) -> Image {
    let inverse_intrinsics = intrinsics().try_inverse().expect("intrinsics");
    Image::from_fn(WIDTH, HEIGHT, 3, |y,x,c| {
        let direction = rotation.transpose()*inverse_intrinsics*Vector3::<Float>::new(x as Float, y as Float, 1.0);
        let t = -center[2]/direction[2];
        let point = center + direction*t;
        texture(point[0]/2.0, point[1]/2.0, c)
    })
}

/**
 * Five cameras at distance CAMERA_DISTANCE looking at the world origin: the reference without
 * rotation, two rotated by +-25 degrees around y and two by +-30 degrees around x.
 * The origin projects to (50,50) in every photo, each photo has one feature there.
 */
pub fn rotated_plane_scene() -> PhotoRegistry {
    let rotations = vec![Matrix3::<Float>::identity(), rotation_y(25.0), rotation_y(-25.0), rotation_x(30.0), rotation_x(-30.0)];
    let centers = rotations.iter().map(|r| r.transpose()*Vector3::<Float>::new(0.0, 0.0, -CAMERA_DISTANCE)).collect::<Vec<Vector3<Float>>>();
    let images = rotations.iter().zip(centers.iter()).map(|(r,c)| rendered_plane_image(r, c)).collect::<Vec<Image>>();
    let projections = rotations.iter().zip(centers.iter()).map(|(r,c)| projection(r, c)).collect::<Vec<Vec<Float>>>();
    let mut registry = PhotoRegistry::new(images, None, &projections, MatchingParameters::default()).expect("rotated plane scene");

    for id in 0..registry.photo_count() {
        registry.set_features(id, &[Feature::new(50, 50, 1.0, FeatureType::DoG)]);
    }
    registry
}

pub fn plane_scene() -> PhotoRegistry {
    plane_scene_with(MatchingParameters::default(), None)
}

pub fn origin() -> Vector4<Float> {
    Vector4::<Float>::new(0.0, 0.0, 0.0, 1.0)
}

pub fn assert_close(a: Float, b: Float, tolerance: Float) {
    assert!((a - b).abs() <= tolerance, "{} and {} differ by more than {}", a, b, tolerance);
}

pub fn assert_vector_close(a: &Vector4<Float>, b: &Vector4<Float>, tolerance: Float) {
    assert!((a - b).norm() <= tolerance, "{} and {} differ by more than {}", a, b, tolerance);
}
