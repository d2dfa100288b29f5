//! Option catalogues for the settings views.
//!
//! Each catalogue maps a persisted string value (the key stored in the
//! preference store and sent to the host) to a display label.

use serde::{Deserialize, Serialize};

/// A closed set of choices backed by a stable string value.
pub trait SettingOption: Copy + PartialEq + Default + 'static {
    /// Every choice in display order.
    const ALL: &'static [Self];

    /// Persisted value.
    fn as_str(&self) -> &'static str;

    /// Human readable label.
    fn label(&self) -> &'static str;

    /// Parse a persisted value.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|o| o.as_str() == value)
    }

    /// Parse a persisted value, falling back to the default choice.
    fn parse_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    /// Next choice, wrapping around.
    fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|o| o == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous choice, wrapping around.
    fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|o| o == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Context the assistant is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Interview,
    Sales,
    Meeting,
    Presentation,
    Negotiation,
    Exam,
}

impl SettingOption for Profile {
    const ALL: &'static [Self] = &[
        Profile::Interview,
        Profile::Sales,
        Profile::Meeting,
        Profile::Presentation,
        Profile::Negotiation,
        Profile::Exam,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Profile::Interview => "interview",
            Profile::Sales => "sales",
            Profile::Meeting => "meeting",
            Profile::Presentation => "presentation",
            Profile::Negotiation => "negotiation",
            Profile::Exam => "exam",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Profile::Interview => "Job Interview",
            Profile::Sales => "Sales Call",
            Profile::Meeting => "Business Meeting",
            Profile::Presentation => "Presentation",
            Profile::Negotiation => "Negotiation",
            Profile::Exam => "Exam Assistant",
        }
    }
}

/// Label for a raw profile value, echoing unknown values verbatim.
pub fn profile_label(raw: &str) -> String {
    Profile::parse(raw)
        .map(|p| p.label().to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Response language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "es-ES")]
    EsEs,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "it-IT")]
    ItIt,
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "ja-JP")]
    JaJp,
    #[serde(rename = "ko-KR")]
    KoKr,
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl SettingOption for Language {
    const ALL: &'static [Self] = &[
        Language::EnUs,
        Language::EnGb,
        Language::EsEs,
        Language::FrFr,
        Language::DeDe,
        Language::ItIt,
        Language::PtBr,
        Language::JaJp,
        Language::KoKr,
        Language::ZhCn,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Language::EnUs => "en-US",
            Language::EnGb => "en-GB",
            Language::EsEs => "es-ES",
            Language::FrFr => "fr-FR",
            Language::DeDe => "de-DE",
            Language::ItIt => "it-IT",
            Language::PtBr => "pt-BR",
            Language::JaJp => "ja-JP",
            Language::KoKr => "ko-KR",
            Language::ZhCn => "zh-CN",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Language::EnUs => "English (US)",
            Language::EnGb => "English (UK)",
            Language::EsEs => "Spanish",
            Language::FrFr => "French",
            Language::DeDe => "German",
            Language::ItIt => "Italian",
            Language::PtBr => "Portuguese (Brazil)",
            Language::JaJp => "Japanese",
            Language::KoKr => "Korean",
            Language::ZhCn => "Chinese (Simplified)",
        }
    }
}

/// How often the host captures the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScreenshotInterval {
    #[serde(rename = "3")]
    Seconds3,
    #[default]
    #[serde(rename = "5")]
    Seconds5,
    #[serde(rename = "10")]
    Seconds10,
    #[serde(rename = "15")]
    Seconds15,
    #[serde(rename = "30")]
    Seconds30,
    #[serde(rename = "manual")]
    Manual,
}

impl ScreenshotInterval {
    /// Interval in seconds, `None` for manual capture.
    pub fn seconds(&self) -> Option<u32> {
        match self {
            ScreenshotInterval::Seconds3 => Some(3),
            ScreenshotInterval::Seconds5 => Some(5),
            ScreenshotInterval::Seconds10 => Some(10),
            ScreenshotInterval::Seconds15 => Some(15),
            ScreenshotInterval::Seconds30 => Some(30),
            ScreenshotInterval::Manual => None,
        }
    }
}

impl SettingOption for ScreenshotInterval {
    const ALL: &'static [Self] = &[
        ScreenshotInterval::Seconds3,
        ScreenshotInterval::Seconds5,
        ScreenshotInterval::Seconds10,
        ScreenshotInterval::Seconds15,
        ScreenshotInterval::Seconds30,
        ScreenshotInterval::Manual,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ScreenshotInterval::Seconds3 => "3",
            ScreenshotInterval::Seconds5 => "5",
            ScreenshotInterval::Seconds10 => "10",
            ScreenshotInterval::Seconds15 => "15",
            ScreenshotInterval::Seconds30 => "30",
            ScreenshotInterval::Manual => "manual",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ScreenshotInterval::Seconds3 => "3 seconds",
            ScreenshotInterval::Seconds5 => "5 seconds",
            ScreenshotInterval::Seconds10 => "10 seconds",
            ScreenshotInterval::Seconds15 => "15 seconds",
            ScreenshotInterval::Seconds30 => "30 seconds",
            ScreenshotInterval::Manual => "Manual only",
        }
    }
}

/// Capture image quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Low,
    #[default]
    Medium,
    High,
}

impl SettingOption for ImageQuality {
    const ALL: &'static [Self] = &[ImageQuality::Low, ImageQuality::Medium, ImageQuality::High];

    fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Low => "low",
            ImageQuality::Medium => "medium",
            ImageQuality::High => "high",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ImageQuality::Low => "Low (faster)",
            ImageQuality::Medium => "Medium",
            ImageQuality::High => "High (slower)",
        }
    }
}

/// UI density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Normal,
    Compact,
}

impl SettingOption for LayoutMode {
    const ALL: &'static [Self] = &[LayoutMode::Normal, LayoutMode::Compact];

    fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Normal => "normal",
            LayoutMode::Compact => "compact",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            LayoutMode::Normal => "Normal",
            LayoutMode::Compact => "Compact",
        }
    }
}

/// Which audio sources the host captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioMode {
    #[default]
    SpeakerOnly,
    MicOnly,
    Both,
}

impl SettingOption for AudioMode {
    const ALL: &'static [Self] = &[AudioMode::SpeakerOnly, AudioMode::MicOnly, AudioMode::Both];

    fn as_str(&self) -> &'static str {
        match self {
            AudioMode::SpeakerOnly => "speaker_only",
            AudioMode::MicOnly => "mic_only",
            AudioMode::Both => "both",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AudioMode::SpeakerOnly => "Speaker Only",
            AudioMode::MicOnly => "Microphone Only",
            AudioMode::Both => "Both Speaker & Microphone",
        }
    }
}

/// How hard the host tries to hide the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StealthLevel {
    #[default]
    Visible,
    Balanced,
    Ultra,
}

impl SettingOption for StealthLevel {
    const ALL: &'static [Self] = &[StealthLevel::Visible, StealthLevel::Balanced, StealthLevel::Ultra];

    fn as_str(&self) -> &'static str {
        match self {
            StealthLevel::Visible => "visible",
            StealthLevel::Balanced => "balanced",
            StealthLevel::Ultra => "ultra",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            StealthLevel::Visible => "Visible (Normal)",
            StealthLevel::Balanced => "Balanced (Some Hiding)",
            StealthLevel::Ultra => "Ultra Stealth (Maximum Hiding)",
        }
    }
}
