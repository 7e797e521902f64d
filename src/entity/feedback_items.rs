//! 评分明细实体

use sea_orm::entity::prelude::*;

use crate::storage::FeedbackItemRow;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub subject_id: i64,
    pub rating: i16,
    pub comment: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id",
        on_delete = "Cascade"
    )]
    Submission,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_row(self) -> FeedbackItemRow {
        FeedbackItemRow {
            id: Some(self.id),
            submission_id: self.submission_id,
            subject_id: self.subject_id,
            rating: self.rating,
            comment: self.comment,
        }
    }
}
