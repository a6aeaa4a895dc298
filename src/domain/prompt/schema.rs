//! 结构化输出约束
//!
//! 生成 API 的 responseSchema（OpenAPI 子集，类型名大写）

use serde_json::{json, Value};

/// 多章节结果的集合字段名
pub const OUTLINE_FIELD: &str = "outline";

fn chapter_object(title_description: &str, beat_description: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": title_description,
            },
            "beat": {
                "type": "STRING",
                "description": beat_description,
            },
        },
        "required": ["title", "beat"],
    })
}

/// 多章节大纲：`{ "outline": [{ "title", "beat" }, ...] }`
pub fn outline_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            (OUTLINE_FIELD): {
                "type": "ARRAY",
                "description": "A list of chapter objects.",
                "items": chapter_object(
                    "一个引人入胜的中文章节标题。",
                    "遵循雪花写作法和三幕剧结构，对此章节的故事节拍进行简短描述（例如：“激励事件”、“第一个转折点”、“中点”、“一败涂地”）。",
                ),
            },
        },
        "required": [OUTLINE_FIELD],
    })
}

/// 单章节：`{ "title", "beat" }`
pub fn single_chapter_schema() -> Value {
    chapter_object(
        "一个引人入胜的中文章节标题，与前后章节衔接自然。",
        "对此章节的故事节拍进行简短描述，确保其在整个故事结构中的作用清晰且必要。",
    )
}
