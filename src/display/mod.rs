//! Avatar image display

pub mod image;

pub use image::{compose_beside, AvatarDisplay, ImageBackend, ImageOutcome, ImgcatBackend};
