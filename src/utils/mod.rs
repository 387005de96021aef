//! Utility modules for the drawing helpers.
//!
//! This module provides essential utilities organized by domain:
//! - `paths`: Vault path normalization, splitting, export filenames
//! - `filesystem`: Collision-free filenames, folder creation, filename sanitization
//! - `logger`: Component-scoped logging macros and the `env_logger` backend

pub mod filesystem;
pub mod logger;
pub mod paths;

// Re-export commonly used functions
pub use filesystem::{
    candidate_filenames, check_and_create_folder, sanitize_filename, unique_filepath,
};
pub use logger::init_logging;
pub use paths::{
    image_path_from_drawing_file, normalize_path, split_folder_and_filename, FolderAndFilename,
};
