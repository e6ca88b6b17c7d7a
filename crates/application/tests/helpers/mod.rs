pub mod mock_lookup;

pub use mock_lookup::{ips, resolvers, MockReverseLookup};
