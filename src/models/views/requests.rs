use serde::Deserialize;

use crate::models::{Program, Semester};

/// 仪表盘筛选条件，各角色按需使用
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DashboardParams {
    pub program: Option<Program>,
    pub semester: Option<Semester>,
}
