use serde::Deserialize;

/// 更新会话开关，未提供的保持不变
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub allow_anonymous: Option<bool>,
    pub disable_edits_after_submit: Option<bool>,
}
