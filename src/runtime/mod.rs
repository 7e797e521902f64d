//! 运行时：共享状态、操作日志与生命周期

pub mod activity;
pub mod lifetime;
pub mod state;

pub use activity::ActivityLog;
pub use state::AppState;
