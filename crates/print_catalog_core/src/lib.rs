pub mod camera;
pub mod catalog;
pub mod domain;
pub mod draft;
pub mod memory;
pub mod ports;
pub mod session;
pub mod store;

pub use camera::CameraSession;
pub use catalog::{label_counts, rank_labels, LabelCount, PrintFilter};
pub use domain::{ImageFile, NewPrint, Print};
pub use draft::{parse_labels, validate_image, PrintDraft, ValidDraft, ValidationError, MAX_IMAGE_BYTES};
pub use memory::InMemoryStorage;
pub use ports::{CameraDevice, Frame, ImageEncoder, KeyValueStorage, PortError, PortResult, VideoStream};
pub use session::{CatalogError, LoadState, PrintCatalog};
pub use store::{PrintStore, DEFAULT_STORAGE_KEY};
