use serde::{Deserialize, Serialize};

use crate::models::{Program, Semester};

/// 可评价的课程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    // 唯一 ID
    pub id: i64,
    // 课程代码，如 FIN101
    pub code: String,
    // 课程名称
    pub name: String,
    pub program: Program,
    pub semester: Semester,
    // 授课教师 ID（软引用）
    pub teacher_id: i64,
}

impl Subject {
    /// 是否属于指定的专业学期
    pub fn in_scope(&self, program: Program, semester: Semester) -> bool {
        self.program == program && self.semester == semester
    }
}
