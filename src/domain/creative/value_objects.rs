//! Creative Context - Value Objects
//!
//! 表单中的枚举型创作参数（参考番茄小说分类）

use serde::{Deserialize, Serialize};

/// 具有中文显示值的枚举
pub trait Labeled: Copy + 'static {
    /// 显示值（写入上下文的文本）
    fn label(&self) -> &'static str;

    /// 全部可选项（按表单顺序）
    fn all() -> &'static [Self];
}

macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl Labeled for $name {
            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labeled_enum! {
    /// 小说主题
    NovelTheme {
        Fantasy => "东方奇幻",
        EasternFantasy => "东方仙侠",
        SciFiFuture => "科幻末世",
        UrbanGaoWu => "都市高武",
        UrbanSupernatural => "悬疑灵异",
        SuspenseBrain => "悬疑脑洞",
        AntiWar => "抗战谍战",
        HistoricalAncient => "历史古代",
        HistoricalBrain => "历史脑洞",
        UrbanFarming => "都市种田",
        UrbanBrain => "都市脑洞",
        UrbanDaily => "都市日常",
        XuanhuanBrain => "玄幻脑洞",
        Wargod => "战神赘婿",
        AnimeDerivative => "动漫衍生",
        GameSports => "游戏体育",
        TraditionalXuanhuan => "传统玄幻",
        UrbanCultivation => "都市修真",
        NewGodDerivative => "新神衍生",
        TenDayDerivative => "十日衍生",
        JourneyToWest => "西游衍生",
        PublicDerivative => "公版衍生",
        RedMansion => "红楼衍生",
    }
}

labeled_enum! {
    /// 主角人设
    CharacterArchetype {
        MultiFemaleLead => "多女主",
        ZhuiXu => "赘婿",
        Almighty => "全能",
        DaLao => "大佬",
        Miss => "大小姐",
        TeGong => "特工",
        GameAnchor => "游戏主播",
        ShenTan => "神探",
        PalaceGuard => "宫廷侯爵",
        Emperor => "皇帝",
        SingleFemaleLead => "单女主",
        SchoolBeauty => "校花",
        NoFemaleLead => "无女主",
        Empress => "女帝",
        SpecialForces => "特种兵",
        Villain => "反派",
        ShenYi => "神医",
        NaiBa => "奶爸",
        XueBa => "学霸",
        Genius => "天才",
        FuHei => "腹黑",
        PretendToBeWeak => "扮猪吃虎",
    }
}

labeled_enum! {
    /// 情节套路
    PlotTrope {
        Derivative => "衍生",
        Invincible => "无敌",
        YiTu => "仕途",
        ZongYing => "综影视",
        Apocalypse => "天灾",
        FirstPerson => "第一人称",
        Cyberpunk => "赛博朋克",
        FourthApocalypse => "第四天灾",
        Gourmet => "美食",
        Ancient => "古代",
        Suspense => "悬疑",
        Cthulhu => "克苏鲁",
        UrbanSuperpower => "都市异能",
        ApocalypseSurvival => "末日求生",
        SpiritRevival => "灵气复苏",
        GaoWuWorld => "高武世界",
        OtherWorld => "异世大陆",
        GoToEast => "东方玄幻",
        KeZhan => "课战",
        QingChao => "清朝",
        SongChao => "宋朝",
        DuanCeng => "断层",
        WuJiang => "武将",
        GuoYun => "国运",
        ZongZong => "综综",
        System => "系统流",
    }
}

labeled_enum! {
    /// 作者风格
    AuthorStyle {
        Default => "默认风格 | Default",
        WoChiXiHongShi => "我吃西红柿 | I Eat Tomatoes",
        ChenDong => "辰东 | Chen Dong",
        TangJiaSanShao => "唐家三少 | Tang Jia San Shao",
        ErGen => "耳根 | Er Gen",
    }
}

labeled_enum! {
    /// 小说篇幅
    NovelLength {
        Short => "短篇 (<5万字)",
        Medium => "中篇 (5-20万字)",
        Long => "长篇 (20-100万字)",
        Epic => "超长篇 (100万字+)",
    }
}

impl AuthorStyle {
    /// 作者名（显示值中 `|` 之前的中文部分）
    pub fn author_name(&self) -> &'static str {
        let label = self.label();
        label.split(" | ").next().unwrap_or(label)
    }
}

/// 枚举选项或自定义文本
///
/// 选择“自定义”时，自由文本与该变体绑定，不存在“枚举 + 平行字符串”的约定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice<T> {
    Fixed(T),
    Custom(String),
}

impl<T: Labeled> Choice<T> {
    /// 解析为最终显示值
    ///
    /// 自定义文本为空白时返回 None，由调用方决定占位符
    pub fn resolve(&self) -> Option<&str> {
        match self {
            Choice::Fixed(value) => Some(value.label()),
            Choice::Custom(text) if text.trim().is_empty() => None,
            Choice::Custom(text) => Some(text.as_str()),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Choice::Custom(_))
    }
}

impl<T> From<T> for Choice<T> {
    fn from(value: T) -> Self {
        Choice::Fixed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_choice_resolves_to_label() {
        let theme: Choice<NovelTheme> = NovelTheme::Fantasy.into();
        assert_eq!(theme.resolve(), Some("东方奇幻"));
    }

    #[test]
    fn test_custom_choice_resolves_to_override() {
        let plot: Choice<PlotTrope> = Choice::Custom("星际矿工逆袭".to_string());
        assert_eq!(plot.resolve(), Some("星际矿工逆袭"));
        assert!(plot.is_custom());
    }

    #[test]
    fn test_blank_custom_choice_resolves_to_none() {
        let character: Choice<CharacterArchetype> = Choice::Custom("   ".to_string());
        assert_eq!(character.resolve(), None);
    }

    #[test]
    fn test_author_name_strips_english_half() {
        assert_eq!(AuthorStyle::ChenDong.author_name(), "辰东");
        assert_eq!(AuthorStyle::Default.author_name(), "默认风格");
    }

    #[test]
    fn test_choice_serde_shape() {
        let fixed: Choice<NovelTheme> = serde_json::from_str(r#"{"fixed":"sci_fi_future"}"#).unwrap();
        assert_eq!(fixed, Choice::Fixed(NovelTheme::SciFiFuture));

        let custom: Choice<NovelTheme> = serde_json::from_str(r#"{"custom":"蒸汽朋克"}"#).unwrap();
        assert_eq!(custom, Choice::Custom("蒸汽朋克".to_string()));
    }

    #[test]
    fn test_all_lists_every_variant() {
        assert_eq!(NovelLength::all().len(), 4);
        assert_eq!(AuthorStyle::all().len(), 5);
        assert!(PlotTrope::all().contains(&PlotTrope::System));
    }
}
