//! PDF rendering modules for tiling
//!
//! This module handles all PDF-specific operations:
//! - Creating XObjects from source and overlay pages
//! - Building tile pages and the output page tree
//! - Reading and rescaling page boxes
//! - Deep copying PDF objects

mod boxes;
mod page;
mod xobject;

pub use boxes::*;
pub use page::*;
pub use xobject::{copy_object_deep, create_page_xobject};
