use serde::Deserialize;

use crate::models::{Program, Semester};

/// 统计查询参数
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StatsParams {
    pub program: Program,
    pub semester: Semester,
}
