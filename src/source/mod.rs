//! Review inputs: the OCR mapping file and the image store.

mod images;
mod input;

pub use images::{DirectoryImageSource, ImageSource};
pub use input::{load_items, parse_items};

#[cfg(test)]
pub use images::MockImageSource;
