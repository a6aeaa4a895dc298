//! Creative Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CreativeError {
    #[error("请输入小说标题 | Please enter a novel title.")]
    MissingTitle,

    #[error("章节数量无效: {0}")]
    InvalidChapterCount(u32),
}
