pub mod resolution;

pub use resolution::{effective_worker_count, ResolutionReport, ResolveIpListUseCase};
