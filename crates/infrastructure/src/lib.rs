pub mod dns;
pub mod input;
pub mod system;

pub use dns::PtrReverseLookup;
pub use input::load_lines;
pub use system::SystemReverseLookup;
