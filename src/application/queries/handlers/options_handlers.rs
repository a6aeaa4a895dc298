//! Options Query Handler - 表单枚举选项

use serde::Serialize;

use crate::application::error::ApplicationError;
use crate::application::queries::ListOptions;
use crate::domain::asset::AssetKind;
use crate::domain::creative::{
    AuthorStyle, CharacterArchetype, Labeled, NovelLength, NovelTheme, PlotTrope,
};

/// 单个选项：序列化值 + 显示值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct OptionsResponse {
    pub lengths: Vec<OptionItem>,
    pub themes: Vec<OptionItem>,
    pub characters: Vec<OptionItem>,
    pub plots: Vec<OptionItem>,
    pub author_styles: Vec<OptionItem>,
    pub asset_kinds: Vec<OptionItem>,
}

fn options_of<T: Labeled + Serialize>() -> Vec<OptionItem> {
    T::all()
        .iter()
        .filter_map(|v| {
            let value = serde_json::to_value(v).ok()?.as_str()?.to_string();
            Some(OptionItem {
                value,
                label: v.label().to_string(),
            })
        })
        .collect()
}

/// ListOptions Handler
pub struct ListOptionsHandler;

impl ListOptionsHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, _query: ListOptions) -> Result<OptionsResponse, ApplicationError> {
        Ok(OptionsResponse {
            lengths: options_of::<NovelLength>(),
            themes: options_of::<NovelTheme>(),
            characters: options_of::<CharacterArchetype>(),
            plots: options_of::<PlotTrope>(),
            author_styles: options_of::<AuthorStyle>(),
            asset_kinds: AssetKind::ALL
                .iter()
                .map(|k| OptionItem {
                    value: k.as_str().to_string(),
                    label: k.label().to_string(),
                })
                .collect(),
        })
    }
}

impl Default for ListOptionsHandler {
    fn default() -> Self {
        Self::new()
    }
}
