//! Helpers for a note-taking application's drawing plugin.
//!
//! Vault paths and filenames, downloads, seeded random numbers, text
//! wrapping, element geometry, pane selection and embedded-image
//! descriptors. The host's storage and workspace are reached through the
//! [`Vault`] and [`Workspace`] traits.

pub mod download;
pub mod error;
pub mod geometry;
pub mod image_ops;
pub mod random;
pub mod settings;
pub mod text;
pub mod utils;
pub mod vault;
pub mod workspace;

pub use download::{download, parse_data_url, DataUrl};
pub use error::{AppError, AppResult};
pub use geometry::{
    rotate, rotated_bounding_box, rotated_dimensions, scene_coords_to_viewport_coords,
    viewport_coords_to_scene_coords, Bounds, ElementBox, Point, Viewport, Zoom,
};
pub use image_ops::{
    get_drawing_image, is_drawing_file, svg_to_base64, DrawingImage, ImageMimeType, ImageSize,
    NoSvgExporter, SvgExporter, IMAGE_TYPES,
};
pub use random::{random_integer, SeededRandom};
pub use settings::{load_settings, save_settings, Settings};
pub use text::{wrap_text, wrap_with_settings};
pub use utils::{
    check_and_create_folder, image_path_from_drawing_file, init_logging, normalize_path,
    split_folder_and_filename, unique_filepath, FolderAndFilename,
};
pub use vault::{FsVault, Vault, VaultEntry, VaultFile};
pub use workspace::{
    get_new_or_adjacent_leaf, open_in_new_or_adjacent_leaf, Direction, LeafId, PaneLayout,
    Workspace,
};
