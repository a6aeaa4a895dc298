//! Asset Context - 生成内容
//!
//! 七类自由文本产物：章节正文、一句话梗概、故事钩子、金手指、核心设定、人物设定、完整世界观。
//! 仅驻留内存，由对应的生成调用或手动编辑整体覆盖。

use serde::{Deserialize, Serialize};

/// 生成内容类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Chapter,
    Synopsis,
    StoryHook,
    GoldenFinger,
    CoreSetting,
    CharacterProfiles,
    FullWorldview,
}

impl AssetKind {
    pub const ALL: [AssetKind; 7] = [
        AssetKind::Chapter,
        AssetKind::Synopsis,
        AssetKind::StoryHook,
        AssetKind::GoldenFinger,
        AssetKind::CoreSetting,
        AssetKind::CharacterProfiles,
        AssetKind::FullWorldview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Chapter => "chapter",
            AssetKind::Synopsis => "synopsis",
            AssetKind::StoryHook => "story_hook",
            AssetKind::GoldenFinger => "golden_finger",
            AssetKind::CoreSetting => "core_setting",
            AssetKind::CharacterProfiles => "character_profiles",
            AssetKind::FullWorldview => "full_worldview",
        }
    }

    /// 内容标签页名称
    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Chapter => "章节内容",
            AssetKind::Synopsis => "一句话梗概",
            AssetKind::StoryHook => "故事钩子",
            AssetKind::GoldenFinger => "金手指",
            AssetKind::CoreSetting => "核心设定",
            AssetKind::CharacterProfiles => "人物设定",
            AssetKind::FullWorldview => "完整世界观",
        }
    }

    /// 是否为仅依赖核心设定的辅助设定（章节正文除外）
    pub fn is_auxiliary(&self) -> bool {
        !matches!(self, AssetKind::Chapter)
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 当前各类生成内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBoard {
    #[serde(default)]
    pub chapter: String,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub story_hook: String,
    #[serde(default)]
    pub golden_finger: String,
    #[serde(default)]
    pub core_setting: String,
    #[serde(default)]
    pub character_profiles: String,
    #[serde(default)]
    pub full_worldview: String,
}

impl AssetBoard {
    pub fn get(&self, kind: AssetKind) -> &str {
        match kind {
            AssetKind::Chapter => &self.chapter,
            AssetKind::Synopsis => &self.synopsis,
            AssetKind::StoryHook => &self.story_hook,
            AssetKind::GoldenFinger => &self.golden_finger,
            AssetKind::CoreSetting => &self.core_setting,
            AssetKind::CharacterProfiles => &self.character_profiles,
            AssetKind::FullWorldview => &self.full_worldview,
        }
    }

    /// 覆盖指定内容，返回旧值
    pub fn set(&mut self, kind: AssetKind, text: String) -> String {
        let slot = match kind {
            AssetKind::Chapter => &mut self.chapter,
            AssetKind::Synopsis => &mut self.synopsis,
            AssetKind::StoryHook => &mut self.story_hook,
            AssetKind::GoldenFinger => &mut self.golden_finger,
            AssetKind::CoreSetting => &mut self.core_setting,
            AssetKind::CharacterProfiles => &mut self.character_profiles,
            AssetKind::FullWorldview => &mut self.full_worldview,
        };
        std::mem::replace(slot, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_each_kind() {
        let mut board = AssetBoard::default();
        for kind in AssetKind::ALL {
            board.set(kind, kind.label().to_string());
        }
        for kind in AssetKind::ALL {
            assert_eq!(board.get(kind), kind.label());
        }
    }

    #[test]
    fn test_set_returns_previous_text() {
        let mut board = AssetBoard::default();
        assert_eq!(board.set(AssetKind::Synopsis, "v1".to_string()), "");
        assert_eq!(board.set(AssetKind::Synopsis, "v2".to_string()), "v1");
    }

    #[test]
    fn test_kind_wire_names_match_serde() {
        for kind in AssetKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
        assert!(!AssetKind::Chapter.is_auxiliary());
        assert!(AssetKind::FullWorldview.is_auxiliary());
    }
}
