//! Prompt - 提示词与输出约束
//!
//! 纯字符串模板，把核心设定与额外参数拼装为发送给生成 API 的请求文本

mod schema;
mod style;
mod templates;

pub use schema::{outline_schema, single_chapter_schema, OUTLINE_FIELD};
pub use style::{style_name, STYLE_CATALOGUE};
pub use templates::*;
