pub mod constants;
pub mod fit;
pub mod geometry;
pub mod grid;
mod io;
pub mod margin;
mod options;
pub mod overlay;
pub mod paper;
mod poster;
pub mod render;
pub mod tile;
mod types;
pub mod units;

pub use fit::{fit_file_to_media_size, fit_scale, fit_to_media_size};
pub use geometry::{default_media, pdf_dimensions, resolve_page_dim, resolve_paper_size};
pub use grid::{GridLayout, TileCell};
pub use io::{load_pdf, read_pdf, save_pdf, write_pdf_atomic};
pub use margin::compute_margin;
pub use options::*;
pub use overlay::render_overlay;
pub use paper::{NamedPaper, supported_papers};
pub use poster::{PosterGeometry, PosterSummary, make_poster, resolve_geometry};
pub use tile::{TilePlan, content_scale, plan_tiles, tile, tile_with_progress};
pub use types::*;
pub use units::{Unit, parse_dimensions, parse_length};
