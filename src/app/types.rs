//! Type definitions for the application state.
//!
//! - [`View`] - which screen is displayed
//! - [`OnboardingStep`] - position in the first-run wizard
//! - [`CustomizeField`] / [`AdvancedField`] - focused row of a settings form
//! - [`TimedNotice`] - a message that expires on its own

use std::time::{Duration, Instant};

/// Which view is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    Onboarding,
    #[default]
    Main,
    Customize,
    Help,
    History,
    Advanced,
    Assistant,
}

impl View {
    /// Name reported to the host on every view change.
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Onboarding => "onboarding",
            View::Main => "main",
            View::Customize => "customize",
            View::Help => "help",
            View::History => "history",
            View::Advanced => "advanced",
            View::Assistant => "assistant",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Onboarding => "Welcome",
            View::Main => "Cue",
            View::Customize => "Customize",
            View::Help => "Help & Shortcuts",
            View::History => "Conversation History",
            View::Advanced => "Advanced Tools",
            View::Assistant => "Assistant",
        }
    }

    /// Settings-like views that close back to main.
    pub fn is_secondary(&self) -> bool {
        matches!(
            self,
            View::Customize | View::Help | View::History | View::Advanced
        )
    }
}

/// Step of the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnboardingStep {
    #[default]
    Welcome,
    HowItWorks,
    Privacy,
    GetStarted,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 4] = [
        OnboardingStep::Welcome,
        OnboardingStep::HowItWorks,
        OnboardingStep::Privacy,
        OnboardingStep::GetStarted,
    ];

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// The following step, or `None` on the last one.
    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The preceding step, or `None` on the first one.
    pub fn prev(&self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "Welcome to Cue",
            OnboardingStep::HowItWorks => "How It Works",
            OnboardingStep::Privacy => "Privacy & Security",
            OnboardingStep::GetStarted => "Get Started",
        }
    }

    pub fn body(&self) -> &'static [&'static str] {
        match self {
            OnboardingStep::Welcome => &[
                "Your AI assistant for interviews, meetings, and presentations.",
                "Get real-time help during video calls with contextual AI responses.",
            ],
            OnboardingStep::HowItWorks => &[
                "1. Captures your screen and audio to understand the context of your session.",
                "2. The AI model analyzes the content and provides relevant assistance.",
                "3. Get contextual responses and suggestions in real-time.",
            ],
            OnboardingStep::Privacy => &[
                "Your API key and settings are stored locally on this machine.",
                "Content protection hides the overlay from screen recordings where supported.",
                "Conversation history never leaves your data directory.",
            ],
            OnboardingStep::GetStarted => &[
                "You're ready to start!",
                "1. Get your API key from Google AI Studio.",
                "2. Choose your profile (Interview, Meeting, etc.).",
                "3. Start your session and get AI assistance.",
            ],
        }
    }
}

/// Rows of the customize form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomizeField {
    #[default]
    Profile,
    Language,
    ScreenshotInterval,
    ImageQuality,
    LayoutMode,
    AdvancedMode,
}

impl CustomizeField {
    pub const ALL: [CustomizeField; 6] = [
        CustomizeField::Profile,
        CustomizeField::Language,
        CustomizeField::ScreenshotInterval,
        CustomizeField::ImageQuality,
        CustomizeField::LayoutMode,
        CustomizeField::AdvancedMode,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CustomizeField::Profile => "Profile",
            CustomizeField::Language => "Language",
            CustomizeField::ScreenshotInterval => "Screenshot Interval",
            CustomizeField::ImageQuality => "Image Quality",
            CustomizeField::LayoutMode => "Layout Mode",
            CustomizeField::AdvancedMode => "Advanced Mode",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CustomizeField::Profile => "Choose the context for AI responses",
            CustomizeField::Language => "Language for AI responses",
            CustomizeField::ScreenshotInterval => "How often to capture screen automatically",
            CustomizeField::ImageQuality => "Higher quality uses more bandwidth",
            CustomizeField::LayoutMode => "Adjust UI density",
            CustomizeField::AdvancedMode => "Enable advanced tools and features",
        }
    }
}

/// Rows of the advanced form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdvancedField {
    #[default]
    ContentProtection,
    StealthLevel,
    AudioMode,
    ThrottleTokens,
    MaxTokensPerMin,
    ThrottleAtPercent,
    FontSize,
    ClearData,
}

impl AdvancedField {
    pub const ALL: [AdvancedField; 8] = [
        AdvancedField::ContentProtection,
        AdvancedField::StealthLevel,
        AdvancedField::AudioMode,
        AdvancedField::ThrottleTokens,
        AdvancedField::MaxTokensPerMin,
        AdvancedField::ThrottleAtPercent,
        AdvancedField::FontSize,
        AdvancedField::ClearData,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AdvancedField::ContentProtection => "Content Protection",
            AdvancedField::StealthLevel => "Stealth Level",
            AdvancedField::AudioMode => "Audio Mode",
            AdvancedField::ThrottleTokens => "Enable Token Throttling",
            AdvancedField::MaxTokensPerMin => "Max Tokens Per Minute",
            AdvancedField::ThrottleAtPercent => "Throttle at Percentage",
            AdvancedField::FontSize => "Response Font Size",
            AdvancedField::ClearData => "Clear All Data",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AdvancedField::ContentProtection => {
                "Prevents screen recording of this window (may not work on all systems)"
            }
            AdvancedField::StealthLevel => {
                "Controls how hidden the application appears in system processes"
            }
            AdvancedField::AudioMode => "Choose which audio sources to capture",
            AdvancedField::ThrottleTokens => {
                "Automatically reduce capture frequency when approaching API limits"
            }
            AdvancedField::MaxTokensPerMin => "Maximum API tokens to use per minute",
            AdvancedField::ThrottleAtPercent => {
                "Start throttling when reaching this percentage of the limit"
            }
            AdvancedField::FontSize => "Font size for AI responses in pixels",
            AdvancedField::ClearData => {
                "This will remove your API key, settings, and conversation history"
            }
        }
    }

    /// Rows only shown while throttling is enabled.
    pub fn needs_throttling(&self) -> bool {
        matches!(
            self,
            AdvancedField::MaxTokensPerMin | AdvancedField::ThrottleAtPercent
        )
    }
}

/// A message shown until a deadline passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedNotice {
    pub message: String,
    pub expires_at: Instant,
}

impl TimedNotice {
    pub fn new(message: impl Into<String>, now: Instant, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Move a focus index through `len` rows, clamping at both ends.
pub fn step_index(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1).min(len - 1)
    } else {
        current.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_names() {
        assert_eq!(View::Assistant.as_str(), "assistant");
        assert_eq!(View::default(), View::Main);
        assert!(View::History.is_secondary());
        assert!(!View::Assistant.is_secondary());
        assert!(!View::Onboarding.is_secondary());
    }

    #[test]
    fn test_onboarding_steps_are_linear() {
        assert_eq!(OnboardingStep::Welcome.prev(), None);
        assert_eq!(
            OnboardingStep::Welcome.next(),
            Some(OnboardingStep::HowItWorks)
        );
        assert_eq!(OnboardingStep::GetStarted.next(), None);
        assert!(OnboardingStep::GetStarted.is_last());
        assert_eq!(OnboardingStep::GetStarted.index(), 3);
    }

    #[test]
    fn test_timed_notice_expiry() {
        let now = Instant::now();
        let notice = TimedNotice::new("x", now, Duration::from_secs(1));
        assert!(!notice.is_expired(now));
        assert!(notice.is_expired(now + Duration::from_secs(1)));
    }

    #[test]
    fn test_step_index_clamps() {
        assert_eq!(step_index(0, 3, false), 0);
        assert_eq!(step_index(2, 3, true), 2);
        assert_eq!(step_index(1, 3, true), 2);
        assert_eq!(step_index(0, 0, true), 0);
    }
}
