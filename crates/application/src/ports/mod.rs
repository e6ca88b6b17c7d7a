mod reverse_lookup;

pub use reverse_lookup::ReverseLookup;
