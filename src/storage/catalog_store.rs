//! 课程目录
//!
//! 写操作优先调用远端；远端失败或处于本地模式时静默回退到内存修改。
//! 新建的课程插在列表最前面。

use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{Backend, SubjectRow};
use crate::errors::{FeedbackError, Result};
use crate::models::subjects::entities::Subject;
use crate::models::subjects::requests::{CreateSubjectRequest, UpdateSubjectRequest};
use crate::models::{Program, Semester};
use crate::utils::validate::{validate_subject_code, validate_subject_name};

pub struct CatalogStore {
    backend: Backend,
    subjects: RwLock<Vec<Subject>>,
}

impl CatalogStore {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            subjects: RwLock::new(Vec::new()),
        }
    }

    pub async fn list(&self) -> Vec<Subject> {
        self.subjects.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.subjects.read().await.len()
    }

    pub async fn get(&self, id: i64) -> Option<Subject> {
        self.subjects
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// 指定专业学期内的课程，顺序与列表一致
    pub async fn in_scope(&self, program: Program, semester: Semester) -> Vec<Subject> {
        self.subjects
            .read()
            .await
            .iter()
            .filter(|s| s.in_scope(program, semester))
            .cloned()
            .collect()
    }

    pub async fn create(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let code = req.code.trim().to_string();
        let name = req.name.trim().to_string();
        validate_subject_code(&code).map_err(FeedbackError::validation)?;
        validate_subject_name(&name).map_err(FeedbackError::validation)?;

        let mut draft = Subject {
            id: 0,
            code,
            name,
            program: req.program,
            semester: req.semester,
            teacher_id: req.teacher_id,
        };

        let remote_created = match &self.backend {
            Backend::Connected(remote) => {
                let mut row = subject_to_row(&draft);
                row.id = None;
                match remote.insert_subject(row).await {
                    Ok(row) => match subject_from_row(row) {
                        Ok(subject) => Some(subject),
                        Err(e) => {
                            warn!("Remote returned an unreadable subject row: {}", e);
                            None
                        }
                    },
                    Err(e) => {
                        warn!("Remote subject insert failed, falling back to local: {}", e);
                        None
                    }
                }
            }
            Backend::LocalOnly => None,
        };

        let mut subjects = self.subjects.write().await;
        let subject = match remote_created {
            Some(subject) => subject,
            None => {
                draft.id = local_id(&self.backend, &subjects);
                draft
            }
        };
        subjects.insert(0, subject.clone());
        debug!("Subject {} ({}) added to catalog", subject.id, subject.code);
        Ok(subject)
    }

    /// 按 ID 更新，未提供的字段保持不变
    pub async fn update(&self, id: i64, req: UpdateSubjectRequest) -> Result<Subject> {
        let current = self
            .get(id)
            .await
            .ok_or_else(|| FeedbackError::not_found(format!("Subject {id} not found")))?;

        let merged = Subject {
            id,
            code: req
                .code
                .map(|c| c.trim().to_string())
                .unwrap_or(current.code),
            name: req
                .name
                .map(|n| n.trim().to_string())
                .unwrap_or(current.name),
            program: req.program.unwrap_or(current.program),
            semester: req.semester.unwrap_or(current.semester),
            teacher_id: req.teacher_id.unwrap_or(current.teacher_id),
        };
        validate_subject_code(&merged.code).map_err(FeedbackError::validation)?;
        validate_subject_name(&merged.name).map_err(FeedbackError::validation)?;

        let updated = match &self.backend {
            Backend::Connected(remote) => {
                match remote.update_subject(id, subject_to_row(&merged)).await {
                    Ok(row) => subject_from_row(row).unwrap_or_else(|e| {
                        warn!("Remote returned an unreadable subject row: {}", e);
                        merged.clone()
                    }),
                    Err(e) => {
                        warn!("Remote subject update failed, falling back to local: {}", e);
                        merged
                    }
                }
            }
            Backend::LocalOnly => merged,
        };

        let mut subjects = self.subjects.write().await;
        if let Some(slot) = subjects.iter_mut().find(|s| s.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// 按 ID 删除，不级联历史提交
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let remote_deleted = match &self.backend {
            Backend::Connected(remote) => match remote.delete_subject(id).await {
                Ok(deleted) => deleted,
                Err(e) => {
                    warn!("Remote subject delete failed, falling back to local: {}", e);
                    false
                }
            },
            Backend::LocalOnly => false,
        };

        let mut subjects = self.subjects.write().await;
        let before = subjects.len();
        subjects.retain(|s| s.id != id);
        Ok(remote_deleted || subjects.len() < before)
    }

    /// 用远端数据整体替换本地目录
    pub async fn reload(&self) -> Result<Option<usize>> {
        match self.fetch().await? {
            Some(subjects) => Ok(Some(self.replace_all(subjects).await)),
            None => Ok(None),
        }
    }

    /// 读取远端课程并按 ID 倒序排列，不改动本地列表；本地模式返回 `None`
    pub async fn fetch(&self) -> Result<Option<Vec<Subject>>> {
        let Backend::Connected(remote) = &self.backend else {
            return Ok(None);
        };

        let mut fetched = remote
            .select_subjects()
            .await?
            .into_iter()
            .map(subject_from_row)
            .collect::<Result<Vec<_>>>()?;
        fetched.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(Some(fetched))
    }

    pub async fn replace_all(&self, subjects: Vec<Subject>) -> usize {
        let count = subjects.len();
        *self.subjects.write().await = subjects;
        count
    }
}

/// 本地分配的 ID
///
/// 纯本地模式下按最大 ID 递增；远端可用但写入失败时取负数递减，
/// 远端自增 ID 永远不会落入该区间。
fn local_id(backend: &Backend, subjects: &[Subject]) -> i64 {
    match backend {
        Backend::LocalOnly => subjects.iter().map(|s| s.id).max().unwrap_or(0) + 1,
        Backend::Connected(_) => subjects.iter().map(|s| s.id).min().unwrap_or(0).min(0) - 1,
    }
}

pub(crate) fn subject_to_row(subject: &Subject) -> SubjectRow {
    SubjectRow {
        id: Some(subject.id),
        code: subject.code.clone(),
        name: subject.name.clone(),
        program: subject.program.to_string(),
        semester: subject.semester.to_string(),
        teacher_id: subject.teacher_id,
    }
}

pub(crate) fn subject_from_row(row: SubjectRow) -> Result<Subject> {
    let id = row
        .id
        .ok_or_else(|| FeedbackError::serialization("Subject row is missing its id"))?;
    Ok(Subject {
        id,
        code: row.code,
        name: row.name,
        program: row.program.parse().map_err(FeedbackError::serialization)?,
        semester: row.semester.parse().map_err(FeedbackError::serialization)?,
        teacher_id: row.teacher_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FakeRemote;
    use std::sync::Arc;

    fn finance() -> CreateSubjectRequest {
        CreateSubjectRequest {
            code: "FIN101".into(),
            name: "Finance".into(),
            program: Program::Mba,
            semester: Semester::I,
            teacher_id: 10,
        }
    }

    fn marketing() -> CreateSubjectRequest {
        CreateSubjectRequest {
            code: "MKT102".into(),
            name: "Marketing".into(),
            ..finance()
        }
    }

    #[tokio::test]
    async fn test_local_create_assigns_sequential_ids_most_recent_first() {
        let store = CatalogStore::new(Backend::LocalOnly);
        let first = store.create(finance()).await.unwrap();
        let second = store.create(marketing()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        let codes: Vec<String> = store.list().await.into_iter().map(|s| s.code).collect();
        assert_eq!(codes, vec!["MKT102", "FIN101"]);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_code() {
        let store = CatalogStore::new(Backend::LocalOnly);
        let err = store
            .create(CreateSubjectRequest {
                code: "".into(),
                ..finance()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_remote_create_uses_remote_id() {
        let remote = Arc::new(FakeRemote::default());
        remote.seed_subject_ids(40);
        let store = CatalogStore::new(Backend::Connected(remote.clone()));

        let subject = store.create(finance()).await.unwrap();
        assert_eq!(subject.id, 41);
        assert_eq!(remote.subject_rows().len(), 1);
        assert_eq!(remote.subject_rows()[0].teacher_id, 10);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_local() {
        let remote = Arc::new(FakeRemote::default());
        remote.set_failing(true);
        let store = CatalogStore::new(Backend::Connected(remote.clone()));

        let subject = store.create(finance()).await.unwrap();
        assert_eq!(subject.id, -1);
        assert!(remote.subject_rows().is_empty());

        let updated = store
            .update(
                subject.id,
                UpdateSubjectRequest {
                    name: Some("Corporate Finance".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Corporate Finance");
        assert_eq!(updated.code, "FIN101");

        assert!(store.delete(subject.id).await.unwrap());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_fallback_ids_never_collide_with_remote_ids() {
        let remote = Arc::new(FakeRemote::default());
        let store = CatalogStore::new(Backend::Connected(remote.clone()));

        let first = store.create(finance()).await.unwrap();
        remote.set_failing(true);
        let local = store.create(marketing()).await.unwrap();
        let local_again = store
            .create(CreateSubjectRequest {
                code: "OPS103".into(),
                ..finance()
            })
            .await
            .unwrap();
        remote.set_failing(false);
        let second = store
            .create(CreateSubjectRequest {
                code: "HRM104".into(),
                ..finance()
            })
            .await
            .unwrap();

        let mut ids = vec![first.id, local.id, local_again.id, second.id];
        assert_eq!(ids, vec![1, -1, -2, 2]);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert_eq!(remote.subject_rows().len(), 2);
    }

    #[tokio::test]
    async fn test_update_keeps_unsupplied_fields() {
        let store = CatalogStore::new(Backend::LocalOnly);
        let subject = store.create(finance()).await.unwrap();
        let updated = store
            .update(
                subject.id,
                UpdateSubjectRequest {
                    semester: Some(Semester::II),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.semester, Semester::II);
        assert_eq!(updated.name, "Finance");
        assert_eq!(updated.teacher_id, 10);
        assert!(store.in_scope(Program::Mba, Semester::I).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_subject() {
        let store = CatalogStore::new(Backend::LocalOnly);
        let err = store
            .update(9, UpdateSubjectRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E008");
    }

    #[tokio::test]
    async fn test_reload_replaces_wholesale() {
        let remote = Arc::new(FakeRemote::default());
        let store = CatalogStore::new(Backend::Connected(remote.clone()));
        store.create(finance()).await.unwrap();
        store.create(marketing()).await.unwrap();

        remote.set_failing(true);
        store
            .create(CreateSubjectRequest {
                code: "LOC1".into(),
                ..finance()
            })
            .await
            .unwrap();
        assert_eq!(store.len().await, 3);

        remote.set_failing(false);
        assert_eq!(store.reload().await.unwrap(), Some(2));
        let ids: Vec<i64> = store.list().await.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_reload_is_noop_when_local_only() {
        let store = CatalogStore::new(Backend::LocalOnly);
        assert_eq!(store.reload().await.unwrap(), None);
    }

    #[test]
    fn test_field_names_translate_between_row_and_model() {
        let subject = Subject {
            id: 3,
            code: "FIN101".into(),
            name: "Finance".into(),
            program: Program::Mba,
            semester: Semester::I,
            teacher_id: 10,
        };
        let row_json = serde_json::to_value(subject_to_row(&subject)).unwrap();
        let model_json = serde_json::to_value(&subject).unwrap();
        assert_eq!(row_json["teacher_id"], 10);
        assert_eq!(model_json["teacherId"], 10);
        assert_eq!(subject_from_row(subject_to_row(&subject)).unwrap(), subject);
    }
}
