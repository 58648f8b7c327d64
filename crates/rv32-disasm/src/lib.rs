pub mod listing;
pub mod model;

pub use listing::{render_text, sweep, Line, Listing};
pub use model::{is_mapped, load_raw_bin, read_u32, read_u8, Image, Segment};
