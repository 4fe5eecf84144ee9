extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::{GrayImage, RgbImage, Pixel};
use image_rs::flat::NormalForm;
use na::{DMatrix, Vector3};

use crate::Float;

pub mod features;

/**
 * Multi channel image. Every channel is stored as a (height x width) matrix,
 * values are expected to be normalized to [0,1].
 */
#[derive(Debug,Clone)]
pub struct Image {
    pub buffer: Vec<DMatrix<Float>>
}

impl Image {

    pub fn from_channels(channels: Vec<DMatrix<Float>>) -> Image {
        assert!(!channels.is_empty(), "Image needs at least one channel");
        let (rows, cols) = channels[0].shape();
        assert!(channels.iter().all(|c| c.shape() == (rows,cols)), "Channels differ in size");
        Image{ buffer: channels }
    }

    /**
     * Builds an image by evaluating `f(y, x, channel)` for every sample.
     */
    pub fn from_fn<G>(width: usize, height: usize, channels: usize, f: G) -> Image where G: Fn(usize,usize,usize) -> Float {
        let buffer = (0..channels).map(|c| DMatrix::<Float>::from_fn(height, width, |y,x| f(y,x,c))).collect::<Vec<DMatrix<Float>>>();
        Image::from_channels(buffer)
    }

    pub fn from_rgb_image(image: &RgbImage) -> Image {
        debug_assert!(image.sample_layout().is_normal(NormalForm::RowMajorPacked));
        let (width, height) = image.dimensions();
        let buffer = (0..3).map(|c|
            DMatrix::<Float>::from_fn(height as usize, width as usize, |y,x| {
                let pixel = image.get_pixel(x as u32, y as u32);
                (pixel.channels()[c] as Float)/255.0
            })
        ).collect::<Vec<DMatrix<Float>>>();
        Image{ buffer }
    }

    pub fn from_gray_image(image: &GrayImage) -> Image {
        let (width, height) = image.dimensions();
        let channel = DMatrix::<Float>::from_fn(height as usize, width as usize, |y,x| (image.get_pixel(x as u32, y as u32).channels()[0] as Float)/255.0);
        Image{ buffer: vec![channel] }
    }

    pub fn width(&self) -> usize {
        self.buffer[0].ncols()
    }

    pub fn height(&self) -> usize {
        self.buffer[0].nrows()
    }

    pub fn channel_count(&self) -> usize {
        self.buffer.len()
    }

    /**
     * Nearest pixel lookup of the color at (y,x). Returns black outside the image.
     * Single channel images are replicated into all three color components.
     */
    pub fn sample(&self, y: Float, x: Float) -> Vector3<Float> {
        match pixel_index(y, x, self.height(), self.width()) {
            Some((r,c)) => match self.channel_count() {
                1 => Vector3::<Float>::repeat(self.buffer[0][(r,c)]),
                2 => Vector3::<Float>::new(self.buffer[0][(r,c)], self.buffer[1][(r,c)], 0.0),
                _ => Vector3::<Float>::new(self.buffer[0][(r,c)], self.buffer[1][(r,c)], self.buffer[2][(r,c)])
            },
            None => Vector3::<Float>::zeros()
        }
    }
}

/**
 * Foreground silhouette of a photo. `true` marks foreground.
 */
#[derive(Debug,Clone)]
pub struct Mask {
    pub buffer: DMatrix<bool>
}

impl Mask {
    pub fn new(buffer: DMatrix<bool>) -> Mask {
        Mask{ buffer }
    }

    /**
     * Any non-zero pixel is foreground.
     */
    pub fn from_gray_image(image: &GrayImage) -> Mask {
        let (width, height) = image.dimensions();
        let buffer = DMatrix::<bool>::from_fn(height as usize, width as usize, |y,x| image.get_pixel(x as u32, y as u32).channels()[0] > 0);
        Mask{ buffer }
    }

    pub fn width(&self) -> usize {
        self.buffer.ncols()
    }

    pub fn height(&self) -> usize {
        self.buffer.nrows()
    }

    /**
     * True if (y,x) lies on a background pixel. Outside of the mask nothing is excluded.
     */
    pub fn is_masked(&self, y: Float, x: Float) -> bool {
        match pixel_index(y, x, self.height(), self.width()) {
            Some(idx) => !self.buffer[idx],
            None => false
        }
    }
}

fn pixel_index(y: Float, x: Float, height: usize, width: usize) -> Option<(usize,usize)> {
    let r = y.round();
    let c = x.round();
    match r >= 0.0 && c >= 0.0 && r < height as Float && c < width as Float {
        true => Some((r as usize, c as usize)),
        false => None
    }
}
