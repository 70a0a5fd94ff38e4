pub mod file_storage;
pub mod image_encoder;
pub mod image_picker;

pub use file_storage::FileStorage;
pub use image_encoder::DataUrlEncoder;
pub use image_picker::{pick_image, PickError};
