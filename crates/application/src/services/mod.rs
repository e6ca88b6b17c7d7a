pub mod work_queue;

pub use work_queue::{Dequeued, WorkQueue};
