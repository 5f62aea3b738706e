pub mod client;
pub mod config;
pub mod types;

pub use client::MathpixClient;
pub use config::{FailurePolicy, MathpixConfig};
pub use types::{RecognitionRequest, RecognitionResponse, encode_png, png_data_uri};

// Re-export the pixel buffer type so downstream crates don't need to depend
// on `image` directly.
pub use image::RgbaImage;
