//! 课程实体

use sea_orm::entity::prelude::*;

use crate::storage::SubjectRow;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub name: String,
    pub program: String,
    pub semester: String,
    pub teacher_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

// 评分明细只软引用课程，删除课程不级联
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_row(self) -> SubjectRow {
        SubjectRow {
            id: Some(self.id),
            code: self.code,
            name: self.name,
            program: self.program,
            semester: self.semester,
            teacher_id: self.teacher_id,
        }
    }
}
