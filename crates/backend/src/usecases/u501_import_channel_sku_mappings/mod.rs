pub mod batch_upserter;
pub mod dedup;
pub mod executor;
pub mod master_sku_check;
pub mod observer;
pub mod pipeline;
pub mod progress_tracker;

#[cfg(test)]
pub mod test_support;

pub use executor::ImportExecutor;
pub use progress_tracker::ProgressTracker;
