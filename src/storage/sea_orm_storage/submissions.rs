//! 提交与评分明细行读写

use super::SeaOrmRemoteStore;
use crate::entity::feedback_items::{
    ActiveModel as FeedbackItemActiveModel, Column as FeedbackItemColumn,
    Entity as FeedbackItems,
};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{FeedbackError, Result};
use crate::storage::{FeedbackItemRow, SubmissionRow};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmRemoteStore {
    pub async fn select_submissions_impl(&self) -> Result<Vec<SubmissionRow>> {
        let models = Submissions::find()
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| FeedbackError::remote_operation(format!("查询提交失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_row()).collect())
    }

    pub async fn select_feedback_items_impl(&self) -> Result<Vec<FeedbackItemRow>> {
        let models = FeedbackItems::find()
            .order_by_asc(FeedbackItemColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| FeedbackError::remote_operation(format!("查询评分明细失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_row()).collect())
    }

    /// 在同一事务内写入提交行与评分明细，出错时整体回滚
    pub async fn replace_submission_impl(
        &self,
        row: SubmissionRow,
        items: Vec<FeedbackItemRow>,
    ) -> Result<SubmissionRow> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| FeedbackError::remote_connection(format!("开启事务失败: {e}")))?;

        let saved = match row.id {
            Some(id) => {
                let existing = Submissions::find_by_id(id)
                    .one(&txn)
                    .await
                    .map_err(|e| FeedbackError::remote_operation(format!("查询提交失败: {e}")))?
                    .ok_or_else(|| FeedbackError::remote_operation(format!("提交 {id} 不存在")))?;

                let mut model: ActiveModel = existing.into();
                model.anonymous = Set(row.anonymous);
                model.submitted_at = Set(row.submitted_at);
                let updated = model
                    .update(&txn)
                    .await
                    .map_err(|e| FeedbackError::remote_operation(format!("更新提交失败: {e}")))?;

                FeedbackItems::delete_many()
                    .filter(FeedbackItemColumn::SubmissionId.eq(id))
                    .exec(&txn)
                    .await
                    .map_err(|e| {
                        FeedbackError::remote_operation(format!("删除评分明细失败: {e}"))
                    })?;
                updated
            }
            None => ActiveModel {
                student_id: Set(row.student_id),
                program: Set(row.program),
                semester: Set(row.semester),
                anonymous: Set(row.anonymous),
                submitted_at: Set(row.submitted_at),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| FeedbackError::remote_operation(format!("创建提交失败: {e}")))?,
        };

        for item in items {
            FeedbackItemActiveModel {
                submission_id: Set(saved.id),
                subject_id: Set(item.subject_id),
                rating: Set(item.rating),
                comment: Set(item.comment),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| FeedbackError::remote_operation(format!("写入评分明细失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| FeedbackError::remote_operation(format!("提交事务失败: {e}")))?;

        Ok(saved.into_row())
    }
}
