//! 课程行读写

use super::SeaOrmRemoteStore;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{FeedbackError, Result};
use crate::storage::SubjectRow;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmRemoteStore {
    pub async fn select_subjects_impl(&self) -> Result<Vec<SubjectRow>> {
        let models = Subjects::find()
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| FeedbackError::remote_operation(format!("查询课程失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_row()).collect())
    }

    pub async fn insert_subject_impl(&self, row: SubjectRow) -> Result<SubjectRow> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            code: Set(row.code),
            name: Set(row.name),
            program: Set(row.program),
            semester: Set(row.semester),
            teacher_id: Set(row.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| FeedbackError::remote_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_row())
    }

    pub async fn update_subject_impl(&self, id: i64, row: SubjectRow) -> Result<SubjectRow> {
        let existing = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| FeedbackError::remote_operation(format!("查询课程失败: {e}")))?
            .ok_or_else(|| FeedbackError::remote_operation(format!("课程 {id} 不存在")))?;

        let mut model: ActiveModel = existing.into();
        model.code = Set(row.code);
        model.name = Set(row.name);
        model.program = Set(row.program);
        model.semester = Set(row.semester);
        model.teacher_id = Set(row.teacher_id);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| FeedbackError::remote_operation(format!("更新课程失败: {e}")))?;

        Ok(result.into_row())
    }

    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| FeedbackError::remote_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
