pub mod image_io;
pub mod scan;
pub mod snapshot;
pub mod store;

pub use scan::{is_image_file, list_images};
pub use snapshot::snapshot_path;
pub use store::{FsImageStore, ImageStore};
