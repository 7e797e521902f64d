use serde::Serialize;

use crate::config::SurveyConfig;
use crate::models::system::requests::UpdateSettingsRequest;
use crate::survey::EditPolicy;

/// 会话内的问卷开关，不落盘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySettings {
    pub allow_anonymous: bool,
    pub disable_edits_after_submit: bool,
}

impl Default for SurveySettings {
    fn default() -> Self {
        Self::from_config(&SurveyConfig::default())
    }
}

impl SurveySettings {
    pub fn from_config(config: &SurveyConfig) -> Self {
        Self {
            allow_anonymous: config.allow_anonymous,
            disable_edits_after_submit: config.disable_edits_after_submit,
        }
    }

    pub fn edit_policy(&self) -> EditPolicy {
        if self.disable_edits_after_submit {
            EditPolicy::LockAfterSubmit
        } else {
            EditPolicy::EditUntilSubmit
        }
    }

    pub fn apply(&mut self, update: &UpdateSettingsRequest) {
        if let Some(allow) = update.allow_anonymous {
            self.allow_anonymous = allow;
        }
        if let Some(disable) = update.disable_edits_after_submit {
            self.disable_edits_after_submit = disable;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_lock_after_submit() {
        let settings = SurveySettings::default();
        assert!(settings.allow_anonymous);
        assert_eq!(settings.edit_policy(), EditPolicy::LockAfterSubmit);
    }

    #[test]
    fn test_apply_partial_update() {
        let mut settings = SurveySettings::default();
        settings.apply(&UpdateSettingsRequest {
            allow_anonymous: None,
            disable_edits_after_submit: Some(false),
        });
        assert!(settings.allow_anonymous);
        assert_eq!(settings.edit_policy(), EditPolicy::EditUntilSubmit);
    }
}
