use nalgebra as na;

use na::{Vector2,Vector3};
use serde::{Serialize, Deserialize};
use crate::Float;

pub mod feature_priority_queue;

pub const FEATURE_TYPE_COUNT: usize = 2;

/**
 * Detector that produced a feature. Matching only ever compares features of the same type.
 */
#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum FeatureType {
    DoG = 0,
    Harris = 1
}

impl FeatureType {
    pub fn slot(&self) -> usize {
        *self as usize
    }
}

pub trait Response {
    fn response(&self) -> Float;
}

#[derive(Debug,Copy,Clone,PartialEq,Serialize,Deserialize)]
pub struct Feature {
    pub x: i32,
    pub y: i32,
    pub response: Float,
    pub feature_type: FeatureType
}

impl Feature {
    pub fn new(x: i32, y: i32, response: Float, feature_type: FeatureType) -> Feature {
        Feature{x,y,response,feature_type}
    }

    pub fn get_as_2d_point(&self) -> Vector2<Float> {
        Vector2::<Float>::new(self.x as Float, self.y as Float)
    }

    pub fn get_as_homogeneous_point(&self) -> Vector3<Float> {
        Vector3::<Float>::new(self.x as Float, self.y as Float, 1.0)
    }
}

impl Response for Feature {
    fn response(&self) -> Float {
        self.response
    }
}

/**
 * Splits a flat feature list into one list per feature type, keeping the input order.
 */
pub fn split_into_slots(features: &[Feature]) -> Vec<Vec<Feature>> {
    let mut slots = vec![Vec::<Feature>::new(); FEATURE_TYPE_COUNT];
    for f in features {
        slots[f.feature_type.slot()].push(*f);
    }
    slots
}
