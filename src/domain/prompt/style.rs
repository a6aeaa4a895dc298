//! 作者风格说明

use crate::domain::creative::{AuthorStyle, Choice};

/// 写入系统指令的风格目录
pub const STYLE_CATALOGUE: &str = "    - **我吃西红柿 (I Eat Tomatoes):** 宏大的世界观，清晰的等级体系，爽快的情节推进，杀伐果断的主角。注重“爽点”。
    - **辰东 (Chen Dong):** 史诗感和广阔的尺度，大量的伏笔和悬念（挖坑），宏大而苍凉的氛围，充满力量和想象力的战斗场面。
    - **唐家三少 (Tang Jia San Shao):** 详尽而独特的设定（尤其是能力），非常强调角色的情感和关系，结构严谨且节奏稳定。
    - **耳根 (Er Gen):** 深刻且常带有哲理的意味，独特的角色癖好，幽默与悲剧的结合，复杂而令人难忘的角色名和能力。
    - **默认风格:** 一种平衡的、现代的网络小说风格，适合番茄小说等平台。
    - **自定义:** 如果是自定义风格，请尽力模仿用户在风格名称中描述的特点。";

/// 解析风格选择为指令中使用的作者名
///
/// 自定义风格原样透传；自定义文本为空时退回默认风格
pub fn style_name(style: &Choice<AuthorStyle>) -> String {
    match style {
        Choice::Fixed(s) => s.author_name().to_string(),
        Choice::Custom(text) if text.trim().is_empty() => {
            AuthorStyle::Default.author_name().to_string()
        }
        Choice::Custom(text) => text.clone(),
    }
}
