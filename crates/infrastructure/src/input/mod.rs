pub mod line_loader;

pub use line_loader::{load_lines, parse_lines};
