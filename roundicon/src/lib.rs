pub mod config;
pub mod error;
pub mod icon;
pub mod image;

// Re-export commonly used types
pub use config::{IconSet, IconSpec};
pub use error::IconError;
pub use icon::{generate, generate_all, generate_with, GeneratedIcon, IconReport, RunMode};
pub use image::{CropRegion, PngCompression};
