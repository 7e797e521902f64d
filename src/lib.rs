//! Course Feedback - 学期课程反馈问卷服务
//!
//! 学生按专业与学期为所修课程评分并留言，一学期锁定提交一次；
//! 管理员维护课程目录、查看汇总与导出，协调员查看统计，教师查看本人课程的反馈。
//!
//! # 架构
//! - `cache`: 草稿快照缓存（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 当前用户解析与角色视图限制
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 共享状态与生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 远端存储与本地内存集合
//! - `survey`: 问卷生命周期、汇总统计与提交流程
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod survey;
pub mod utils;
