use serde::Deserialize;

use crate::models::Semester;

/// 打开/切换问卷的查询参数，未指定学期时使用学生当前学期
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormParams {
    pub semester: Option<Semester>,
}

/// 修改单门课程评分或评论
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditItemRequest {
    pub rating: Option<u8>,
    pub comment: Option<String>,
}

/// 切换匿名提交
#[derive(Debug, Clone, Deserialize)]
pub struct AnonymousRequest {
    pub anonymous: bool,
}
