//! 问卷核心：草稿生命周期、汇总统计与提交流程

pub mod aggregation;
pub mod drafts;
pub mod gate;
pub mod lifecycle;
pub mod settings;
pub mod workflow;

pub use drafts::{DraftRegistry, DraftSnapshots};
pub use gate::InFlightGate;
pub use lifecycle::{DraftSession, EditPolicy, LifecycleState, LockRequest};
pub use settings::SurveySettings;
