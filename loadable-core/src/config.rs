use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum IndicatorStyle {
    #[default]
    Medium,
    Large,
}

impl IndicatorStyle {
    /// Diameter of the spinner in points.
    pub fn diameter(self) -> f64 {
        match self {
            Self::Medium => 20.0,
            Self::Large => 37.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum ContentMode {
    /// Whole image visible, letterboxed.
    #[default]
    AspectFit,
    /// Image covers the whole slot, overflow is clipped.
    AspectFill,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageViewConfig {
    pub indicator_style: IndicatorStyle,
    pub rounded: bool,
    pub register_notification_center: bool,
    pub stretched: bool,
}

impl Default for ImageViewConfig {
    fn default() -> Self {
        Self {
            indicator_style: IndicatorStyle::Medium,
            rounded: false,
            register_notification_center: true,
            stretched: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaViewConfig {
    pub indicator_style: IndicatorStyle,
    pub rounded: bool,
    pub register_notification_center: bool,
    pub user_interaction_enabled: bool,
    pub stretched: bool,
}

impl Default for MediaViewConfig {
    fn default() -> Self {
        Self {
            indicator_style: IndicatorStyle::Medium,
            rounded: false,
            register_notification_center: true,
            user_interaction_enabled: true,
            stretched: false,
        }
    }
}
