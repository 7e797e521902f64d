//! SeaORM 实体定义
//!
//! 这些实体只在远端存储适配器内部使用，读写结果统一转换为 `storage::rows` 中的行结构。

pub mod prelude;

pub mod feedback_items;
pub mod subjects;
pub mod submissions;
