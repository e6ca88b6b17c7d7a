mod use_cases;

pub use use_cases::{build_lookup, build_resolve_use_case};
