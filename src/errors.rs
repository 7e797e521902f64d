//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_feedback_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum FeedbackError {
            $($variant(String),)*
        }

        impl FeedbackError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(FeedbackError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(FeedbackError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(FeedbackError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl FeedbackError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        FeedbackError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_feedback_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    RemoteConfig("E003", "Remote Store Configuration Error"),
    RemoteConnection("E004", "Remote Store Connection Error"),
    RemoteOperation("E005", "Remote Store Operation Error"),
    StoreUnavailable("E006", "Store Unavailable"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    EditLocked("E010", "Submission Locked"),
    InFlight("E011", "Submission In Flight"),
    Export("E012", "Export Error"),
}

impl FeedbackError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于远端存储故障（连接或查询）
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            FeedbackError::RemoteConnection(_) | FeedbackError::RemoteOperation(_)
        )
    }
}

impl fmt::Display for FeedbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for FeedbackError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for FeedbackError {
    fn from(err: sea_orm::DbErr) -> Self {
        FeedbackError::RemoteOperation(err.to_string())
    }
}

impl From<std::io::Error> for FeedbackError {
    fn from(err: std::io::Error) -> Self {
        FeedbackError::Export(err.to_string())
    }
}

impl From<serde_json::Error> for FeedbackError {
    fn from(err: serde_json::Error) -> Self {
        FeedbackError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for FeedbackError {
    fn from(err: csv::Error) -> Self {
        FeedbackError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeedbackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(FeedbackError::cache_connection("test").code(), "E001");
        assert_eq!(FeedbackError::remote_config("test").code(), "E003");
        assert_eq!(FeedbackError::validation("test").code(), "E007");
        assert_eq!(FeedbackError::in_flight("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            FeedbackError::store_unavailable("test").error_type(),
            "Store Unavailable"
        );
        assert_eq!(
            FeedbackError::edit_locked("test").error_type(),
            "Submission Locked"
        );
    }

    #[test]
    fn test_remote_classification() {
        assert!(FeedbackError::remote_operation("boom").is_remote());
        assert!(FeedbackError::remote_connection("down").is_remote());
        assert!(!FeedbackError::store_unavailable("none").is_remote());
    }

    #[test]
    fn test_format_simple() {
        let err = FeedbackError::validation("2 subject(s) remaining");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("2 subject(s) remaining"));
    }
}
