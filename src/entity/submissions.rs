//! 问卷提交实体

use sea_orm::entity::prelude::*;

use crate::storage::SubmissionRow;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub program: String,
    pub semester: String,
    pub anonymous: bool,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::feedback_items::Entity")]
    FeedbackItems,
}

impl Related<super::feedback_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedbackItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_row(self) -> SubmissionRow {
        SubmissionRow {
            id: Some(self.id),
            student_id: self.student_id,
            program: self.program,
            semester: self.semester,
            anonymous: self.anonymous,
            submitted_at: self.submitted_at,
        }
    }
}
