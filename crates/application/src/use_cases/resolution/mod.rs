pub mod report;
pub mod resolve_ip_list;
mod session;

pub use report::ResolutionReport;
pub use resolve_ip_list::{effective_worker_count, ResolveIpListUseCase, DEFAULT_IDLE_TIMEOUT};
