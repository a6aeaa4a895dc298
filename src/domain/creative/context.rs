//! Creative Context - 上下文组装
//!
//! 把表单状态折叠为所有生成请求共用的“核心设定”文本块。
//! 纯函数，不会失败：空字段输出固定占位符，保证每个提示词形状稳定。

use serde::{Deserialize, Serialize};

use super::value_objects::{
    AuthorStyle, CharacterArchetype, Choice, Labeled, NovelLength, NovelTheme, PlotTrope,
};
use crate::domain::asset::{AssetBoard, AssetKind};
use crate::domain::outline::Outline;

/// 标题占位符
pub const UNTITLED: &str = "未命名";
/// 枚举字段（自定义为空）占位符
pub const NOT_PROVIDED: &str = "未提供";
/// 世界观文本字段占位符
pub const NOT_PROVIDED_BILINGUAL: &str = "未提供 (Not provided)";
/// 尚未生成的设定占位符
pub const NOT_GENERATED: &str = "未生成";

/// 世界观分隔行
const WORLDVIEW_HEADER: &str = "--- 世界观与设定 (Worldview & Setting) ---";
const ASSETS_HEADER: &str = "--- 已生成设定 (Generated Assets) ---";
const OUTLINE_HEADER: &str = "--- 完整大纲 (Full Outline) ---";

/// 创作参数快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreativeContext {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_length")]
    pub length: NovelLength,
    #[serde(default = "default_theme")]
    pub theme: Choice<NovelTheme>,
    #[serde(default = "default_character")]
    pub character: Choice<CharacterArchetype>,
    #[serde(default = "default_plot")]
    pub plot: Choice<PlotTrope>,
    #[serde(default = "default_author_style")]
    pub author_style: Choice<AuthorStyle>,
    #[serde(default)]
    pub world_background: String,
    #[serde(default)]
    pub power_system: String,
    #[serde(default)]
    pub unique_setting: String,
}

fn default_length() -> NovelLength {
    NovelLength::Long
}

fn default_theme() -> Choice<NovelTheme> {
    Choice::Fixed(NovelTheme::Fantasy)
}

fn default_character() -> Choice<CharacterArchetype> {
    Choice::Fixed(CharacterArchetype::Genius)
}

fn default_plot() -> Choice<PlotTrope> {
    Choice::Fixed(PlotTrope::System)
}

fn default_author_style() -> Choice<AuthorStyle> {
    Choice::Fixed(AuthorStyle::Default)
}

impl Default for CreativeContext {
    fn default() -> Self {
        Self {
            title: String::new(),
            length: default_length(),
            theme: default_theme(),
            character: default_character(),
            plot: default_plot(),
            author_style: default_author_style(),
            world_background: String::new(),
            power_system: String::new(),
            unique_setting: String::new(),
        }
    }
}

impl CreativeContext {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// 标题是否已填写（生成请求的前置条件）
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// 组装核心设定文本块
///
/// 固定顺序：标识 → 篇幅 → 主题 → 角色 → 情节 → 世界观字段
pub fn build_context(ctx: &CreativeContext) -> String {
    let lines = [
        format!("小说标题 (Title): {}", or_placeholder(&ctx.title, UNTITLED)),
        format!("小说篇幅 (Length): {}", ctx.length.label()),
        format!("主题 (Theme): {}", ctx.theme.resolve().unwrap_or(NOT_PROVIDED)),
        format!(
            "角色 (Character): {}",
            ctx.character.resolve().unwrap_or(NOT_PROVIDED)
        ),
        format!("情节 (Plot): {}", ctx.plot.resolve().unwrap_or(NOT_PROVIDED)),
        WORLDVIEW_HEADER.to_string(),
        format!(
            "世界背景 (World Background): {}",
            or_placeholder(&ctx.world_background, NOT_PROVIDED_BILINGUAL)
        ),
        format!(
            "力量/规则体系 (Power System): {}",
            or_placeholder(&ctx.power_system, NOT_PROVIDED_BILINGUAL)
        ),
        format!(
            "独特设定亮点 (Unique Setting Points): {}",
            or_placeholder(&ctx.unique_setting, NOT_PROVIDED_BILINGUAL)
        ),
    ];
    lines.join("\n")
}

/// 组装章节正文写作用的完整上下文
///
/// 核心设定 + 已生成设定 + 完整大纲
pub fn build_chapter_context(ctx: &CreativeContext, assets: &AssetBoard, outline: &Outline) -> String {
    let mut lines = vec![build_context(ctx), ASSETS_HEADER.to_string()];

    for (label, kind) in [
        ("一句话梗概 (Synopsis)", AssetKind::Synopsis),
        ("金手指 (Golden Finger)", AssetKind::GoldenFinger),
        ("人物设定 (Character Profiles)", AssetKind::CharacterProfiles),
        ("完整世界观 (Full Worldview)", AssetKind::FullWorldview),
    ] {
        lines.push(format!(
            "{}: {}",
            label,
            or_placeholder(assets.get(kind), NOT_GENERATED)
        ));
    }

    lines.push(OUTLINE_HEADER.to_string());
    for (i, entry) in outline.entries().iter().enumerate() {
        lines.push(format!(
            "Chapter {}: {} (Beat: {})",
            i + 1,
            entry.title,
            entry.beat
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outline::OutlineEntry;

    #[test]
    fn test_default_context_uses_placeholders() {
        let text = build_context(&CreativeContext::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "小说标题 (Title): 未命名");
        assert_eq!(lines[1], "小说篇幅 (Length): 长篇 (20-100万字)");
        assert_eq!(lines[2], "主题 (Theme): 东方奇幻");
        assert_eq!(lines[3], "角色 (Character): 天才");
        assert_eq!(lines[4], "情节 (Plot): 系统流");
        assert_eq!(lines[5], WORLDVIEW_HEADER);
        assert_eq!(lines[6], "世界背景 (World Background): 未提供 (Not provided)");
        assert_eq!(lines[7], "力量/规则体系 (Power System): 未提供 (Not provided)");
        assert_eq!(lines[8], "独特设定亮点 (Unique Setting Points): 未提供 (Not provided)");
    }

    #[test]
    fn test_context_contains_values_verbatim() {
        let ctx = CreativeContext {
            title: "星辰之战".to_string(),
            length: NovelLength::Epic,
            world_background: "九州大陆，灵气枯竭".to_string(),
            power_system: "炼气、筑基、金丹".to_string(),
            unique_setting: "星辰可以被吞噬".to_string(),
            ..CreativeContext::default()
        };

        let text = build_context(&ctx);
        assert!(text.contains("小说标题 (Title): 星辰之战"));
        assert!(text.contains("超长篇 (100万字+)"));
        assert!(text.contains("九州大陆，灵气枯竭"));
        assert!(text.contains("炼气、筑基、金丹"));
        assert!(text.contains("星辰可以被吞噬"));
        assert!(!text.contains(NOT_PROVIDED));
    }

    #[test]
    fn test_custom_override_replaces_enum_label() {
        let ctx = CreativeContext {
            theme: Choice::Custom("赛博修仙".to_string()),
            character: Choice::Custom("退休杀手".to_string()),
            plot: Choice::Custom("时间循环".to_string()),
            ..CreativeContext::default()
        };

        let text = build_context(&ctx);
        assert!(text.contains("主题 (Theme): 赛博修仙"));
        assert!(text.contains("角色 (Character): 退休杀手"));
        assert!(text.contains("情节 (Plot): 时间循环"));
        assert!(!text.contains("东方奇幻"));
    }

    #[test]
    fn test_blank_custom_override_renders_placeholder() {
        let ctx = CreativeContext {
            theme: Choice::Custom(String::new()),
            ..CreativeContext::default()
        };

        let text = build_context(&ctx);
        assert!(text.contains("主题 (Theme): 未提供"));
        assert_eq!(text.lines().count(), 9);
    }

    #[test]
    fn test_has_title_ignores_whitespace() {
        assert!(!CreativeContext::default().has_title());
        assert!(!CreativeContext::default().with_title("  ").has_title());
        assert!(CreativeContext::default().with_title("星辰之战").has_title());
    }

    #[test]
    fn test_chapter_context_includes_assets_and_outline() {
        let ctx = CreativeContext::default().with_title("星辰之战");
        let mut assets = AssetBoard::default();
        assets.set(AssetKind::Synopsis, "少年吞星证道".to_string());
        let mut outline = Outline::default();
        outline.extend(vec![
            OutlineEntry::new("陨星之夜", "激励事件"),
            OutlineEntry::new("初入宗门", "第一个转折点"),
        ]);

        let text = build_chapter_context(&ctx, &assets, &outline);
        assert!(text.starts_with("小说标题 (Title): 星辰之战"));
        assert!(text.contains("一句话梗概 (Synopsis): 少年吞星证道"));
        assert!(text.contains("金手指 (Golden Finger): 未生成"));
        assert!(text.contains("Chapter 1: 陨星之夜 (Beat: 激励事件)"));
        assert!(text.contains("Chapter 2: 初入宗门 (Beat: 第一个转折点)"));
    }
}
