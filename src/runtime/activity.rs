//! 操作日志
//!
//! 提交、目录修改、重新加载和提醒等操作同时写入 tracing 与一个有界的内存列表，
//! 供管理员接口读取。超出容量时丢弃最早的记录。

use chrono::Utc;
use std::collections::VecDeque;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::system::responses::ActivityEntry;

pub struct ActivityLog {
    capacity: usize,
    entries: Mutex<VecDeque<ActivityEntry>>,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    pub async fn record(&self, message: impl Into<String>) {
        let message = message.into();
        info!(target: "activity", "{}", message);

        let mut entries = self.entries.lock().await;
        if entries.len() == self.capacity {
            entries.pop_back();
        }
        entries.push_front(ActivityEntry {
            at: Utc::now(),
            message,
        });
    }

    /// 最新的在前
    pub async fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.lock().await.iter().cloned().collect()
    }
}
