//! Creative Context - 创作参数限界上下文
//!
//! 职责:
//! - 表单枚举与自定义覆盖（Choice）
//! - 核心设定文本块组装

mod context;
mod errors;
mod value_objects;

pub use context::{
    build_chapter_context, build_context, CreativeContext, NOT_GENERATED, NOT_PROVIDED,
    NOT_PROVIDED_BILINGUAL, UNTITLED,
};
pub use errors::CreativeError;
pub use value_objects::{
    AuthorStyle, CharacterArchetype, Choice, Labeled, NovelLength, NovelTheme, PlotTrope,
};
