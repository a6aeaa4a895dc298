//! Novelist - AI 辅助小说大纲创作服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Creative: 创作设定（书名、题材、人物、情节、文风）
//! - Outline: 章节大纲及其编辑规则
//! - Asset: 世界观、人物、简介等设定资料
//! - Prompt: 上下文组装与提示词
//! - Workspace: 单个创作会话的聚合根
//!
//! 应用层 (application/):
//! - Ports: 端口定义（WorkspaceManager, SlotRegistry, GenerationEngine）
//! - GenerationClient: 生成请求与结构化输出解析
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Memory: WorkspaceManager, SlotRegistry 内存实现
//! - Worker: 空闲工作区回收
//! - Adapters: Gemini HTTP 客户端及离线实现
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
