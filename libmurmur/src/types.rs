//! Core types shared by the interaction stores

use serde::{Deserialize, Serialize};

use crate::error::EventError;

/// Server-assigned post identifier, opaque to the core
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub String);

/// Server-assigned comment identifier, opaque to the core
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(pub String);

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PostId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for CommentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ============================================================================
// Media
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// An item handed over by the device media picker.
///
/// The core does not inspect it beyond storing it in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub uri: String,
    pub kind: MediaKind,
}

impl MediaItem {
    pub fn new(id: impl Into<String>, uri: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            kind,
        }
    }
}

// ============================================================================
// Context menu
// ============================================================================

/// Long-press input, already extracted from the native event.
///
/// `absolute_y` is the press position relative to the window,
/// `local_y` relative to the pressed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressEvent {
    absolute_y: f64,
    local_y: f64,
}

impl PressEvent {
    /// Both coordinates must be finite. Negative values are accepted.
    pub fn new(absolute_y: f64, local_y: f64) -> Result<Self, EventError> {
        if !absolute_y.is_finite() {
            return Err(EventError::NonFinite {
                axis: "absolute_y",
                value: absolute_y,
            });
        }
        if !local_y.is_finite() {
            return Err(EventError::NonFinite {
                axis: "local_y",
                value: local_y,
            });
        }
        Ok(Self {
            absolute_y,
            local_y,
        })
    }

    pub fn absolute_y(&self) -> f64 {
        self.absolute_y
    }

    pub fn local_y(&self) -> f64 {
        self.local_y
    }
}

/// Where the context menu anchors. `x` is always 0; consumers anchor
/// horizontally themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuPosition {
    pub x: f64,
    pub y: f64,
}

// ============================================================================
// Subscription and session
// ============================================================================

/// Features gated behind a premium subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumFeature {
    LongVideo,
    PostScheduling,
    ProfileBadge,
    AdvancedSearch,
}

impl PremiumFeature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LongVideo => "long_video",
            Self::PostScheduling => "post_scheduling",
            Self::ProfileBadge => "profile_badge",
            Self::AdvancedSearch => "advanced_search",
        }
    }

    /// Localization key of the feature's display name
    pub fn label_key(&self) -> String {
        format!("subscription.feature.{}", self.as_str())
    }
}

impl std::fmt::Display for PremiumFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub handle: String,
}

/// Localized title and message for a confirmation dialog or banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}
