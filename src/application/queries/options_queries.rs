//! Options Queries - 表单可选项

/// 列出所有枚举选项及其显示值
#[derive(Debug, Clone)]
pub struct ListOptions;
