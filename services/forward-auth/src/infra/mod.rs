pub mod notifier;
pub mod store;
pub mod sweeper;
