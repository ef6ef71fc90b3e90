//! Images Module
//!
//! Image upload, listing, download and deletion.
//!
//! # Module Structure
//!
//! ```text
//! images/
//! ├── mod.rs      - Module exports
//! ├── handlers.rs - HTTP handlers
//! └── storage.rs  - On-disk byte storage keyed by image id
//! ```

pub mod handlers;

pub mod storage;

pub use handlers::{
    delete_image, get_image, get_image_file, list_images, list_project_images, upload_image,
};
pub use storage::ImageStorage;
