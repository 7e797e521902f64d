//! 测试用内存远端，可切换为持续失败，或只让某一步失败

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{FeedbackItemRow, RemoteStore, SubjectRow, SubmissionRow};
use crate::errors::{FeedbackError, Result};

#[derive(Default, Clone)]
struct Tables {
    subjects: Vec<SubjectRow>,
    submissions: Vec<SubmissionRow>,
    items: Vec<FeedbackItemRow>,
    last_subject_id: i64,
    last_submission_id: i64,
    last_item_id: i64,
}

#[derive(Default)]
pub struct FakeRemote {
    failing: AtomicBool,
    failing_step: Mutex<Option<FailingStep>>,
    tables: Mutex<Tables>,
}

/// 可单独注入失败的步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailingStep {
    SelectSubmissions,
    InsertFeedbackItem,
}

impl FakeRemote {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn fail_step(&self, step: Option<FailingStep>) {
        *self.failing_step.lock().unwrap() = step;
    }

    /// 让远端分配的课程 ID 从 `last + 1` 开始
    pub fn seed_subject_ids(&self, last: i64) {
        self.tables.lock().unwrap().last_subject_id = last;
    }

    pub fn subject_rows(&self) -> Vec<SubjectRow> {
        self.tables.lock().unwrap().subjects.clone()
    }

    pub fn submission_rows(&self) -> Vec<SubmissionRow> {
        self.tables.lock().unwrap().submissions.clone()
    }

    pub fn item_rows(&self) -> Vec<FeedbackItemRow> {
        self.tables.lock().unwrap().items.clone()
    }

    pub fn push_submission(&self, mut row: SubmissionRow, items: Vec<FeedbackItemRow>) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        tables.last_submission_id += 1;
        let id = tables.last_submission_id;
        row.id = Some(id);
        tables.submissions.push(row);
        for mut item in items {
            tables.last_item_id += 1;
            item.id = Some(tables.last_item_id);
            item.submission_id = id;
            tables.items.push(item);
        }
        id
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(FeedbackError::remote_connection("connection refused"))
        } else {
            Ok(())
        }
    }

    fn check_step(&self, step: FailingStep) -> Result<()> {
        self.check()?;
        if *self.failing_step.lock().unwrap() == Some(step) {
            return Err(FeedbackError::remote_operation(format!("{step:?} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for FakeRemote {
    async fn select_subjects(&self) -> Result<Vec<SubjectRow>> {
        self.check()?;
        Ok(self.subject_rows())
    }

    async fn insert_subject(&self, mut row: SubjectRow) -> Result<SubjectRow> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        tables.last_subject_id += 1;
        row.id = Some(tables.last_subject_id);
        tables.subjects.push(row.clone());
        Ok(row)
    }

    async fn update_subject(&self, id: i64, mut row: SubjectRow) -> Result<SubjectRow> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let slot = tables
            .subjects
            .iter_mut()
            .find(|s| s.id == Some(id))
            .ok_or_else(|| FeedbackError::remote_operation(format!("subject {id} missing")))?;
        row.id = Some(id);
        *slot = row.clone();
        Ok(row)
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let before = tables.subjects.len();
        tables.subjects.retain(|s| s.id != Some(id));
        Ok(tables.subjects.len() < before)
    }

    async fn select_submissions(&self) -> Result<Vec<SubmissionRow>> {
        self.check_step(FailingStep::SelectSubmissions)?;
        Ok(self.submission_rows())
    }

    async fn select_feedback_items(&self) -> Result<Vec<FeedbackItemRow>> {
        self.check()?;
        Ok(self.item_rows())
    }

    // 在副本上写入，全部成功后才替换，模拟事务
    async fn replace_submission(
        &self,
        mut row: SubmissionRow,
        items: Vec<FeedbackItemRow>,
    ) -> Result<SubmissionRow> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let mut staged = tables.clone();

        let id = match row.id {
            Some(id) => {
                let slot = staged
                    .submissions
                    .iter_mut()
                    .find(|s| s.id == Some(id))
                    .ok_or_else(|| {
                        FeedbackError::remote_operation(format!("submission {id} missing"))
                    })?;
                *slot = row.clone();
                staged.items.retain(|i| i.submission_id != id);
                id
            }
            None => {
                staged.last_submission_id += 1;
                row.id = Some(staged.last_submission_id);
                staged.submissions.push(row.clone());
                staged.last_submission_id
            }
        };

        for mut item in items {
            self.check_step(FailingStep::InsertFeedbackItem)?;
            staged.last_item_id += 1;
            item.id = Some(staged.last_item_id);
            item.submission_id = id;
            staged.items.push(item);
        }

        *tables = staged;
        Ok(row)
    }
}
