//! Container configuration

use serde::{Deserialize, Serialize};

use tabset_panes::PaneName;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabType {
    #[default]
    #[serde(alias = "")]
    Default,
    Card,
    BorderCard,
}

impl TabType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabType::Default => "default",
            TabType::Card => "card",
            TabType::BorderCard => "border-card",
        }
    }
}

impl std::fmt::Display for TabType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TabType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "" | "default" => Ok(TabType::Default),
            "card" => Ok(TabType::Card),
            "border-card" => Ok(TabType::BorderCard),
            _ => Err(CoreError::Config(format!("Unknown tab type: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabPosition {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

impl TabPosition {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, TabPosition::Top | TabPosition::Bottom)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabPosition::Top => "top",
            TabPosition::Right => "right",
            TabPosition::Bottom => "bottom",
            TabPosition::Left => "left",
        }
    }
}

impl std::fmt::Display for TabPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TabPosition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "top" => Ok(TabPosition::Top),
            "right" => Ok(TabPosition::Right),
            "bottom" => Ok(TabPosition::Bottom),
            "left" => Ok(TabPosition::Left),
            _ => Err(CoreError::Config(format!("Unknown tab position: {}", s))),
        }
    }
}

fn default_name() -> PaneName {
    PaneName::from("0")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    #[serde(rename = "type")]
    pub tab_type: TabType,
    pub tab_position: TabPosition,
    /// Every pane gets a close button
    pub closable: bool,
    /// Show the add button
    pub addable: bool,
    /// Both `closable` and `addable`
    pub editable: bool,
    /// Tabs share the full strip width (top/bottom only)
    pub stretch: bool,
    /// Controlled active pane
    pub model_value: Option<PaneName>,
    /// Deprecated alias of `model_value`
    pub active_name: Option<PaneName>,
    /// Active name when neither input is given
    #[serde(default = "default_name")]
    pub default_name: PaneName,
}

impl TabsConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn controlled(model_value: impl Into<PaneName>) -> Self {
        Self {
            model_value: Some(model_value.into()),
            ..Self::default()
        }
    }

    pub fn initial_name(&self) -> PaneName {
        self.model_value
            .clone()
            .or_else(|| self.active_name.clone())
            .unwrap_or_else(|| self.default_name.clone())
    }

    pub fn is_controlled(&self) -> bool {
        self.model_value.is_some() || self.active_name.is_some()
    }

    pub fn panes_closable(&self) -> bool {
        self.closable || self.editable
    }

    pub fn shows_add_button(&self) -> bool {
        self.addable || self.editable
    }

    /// Stretch only applies to a horizontal strip.
    pub fn stretches(&self) -> bool {
        self.stretch && self.tab_position.is_horizontal()
    }
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            tab_type: TabType::default(),
            tab_position: TabPosition::default(),
            closable: false,
            addable: false,
            editable: false,
            stretch: false,
            model_value: None,
            active_name: None,
            default_name: default_name(),
        }
    }
}
