//! 提交中防重入
//!
//! 同一 (学生, 专业, 学期) 同时只允许一个锁定流程；守卫释放时自动解除。

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::errors::{FeedbackError, Result};
use crate::models::SubmissionKey;

#[derive(Debug, Default)]
pub struct InFlightGate {
    pending: DashMap<SubmissionKey, ()>,
}

impl InFlightGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, key: SubmissionKey) -> Result<InFlightGuard<'_>> {
        match self.pending.entry(key) {
            Entry::Occupied(_) => Err(FeedbackError::in_flight(
                "A submission for this semester is already in progress",
            )),
            Entry::Vacant(slot) => {
                slot.insert(());
                Ok(InFlightGuard { gate: self, key })
            }
        }
    }

    pub fn is_pending(&self, key: &SubmissionKey) -> bool {
        self.pending.contains_key(key)
    }
}

pub struct InFlightGuard<'a> {
    gate: &'a InFlightGate,
    key: SubmissionKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.gate.pending.remove(&self.key);
    }
}
