//! Persisted key names.

pub const SELECTED_PROFILE: &str = "selectedProfile";
pub const SELECTED_LANGUAGE: &str = "selectedLanguage";
pub const SCREENSHOT_INTERVAL: &str = "selectedScreenshotInterval";
pub const IMAGE_QUALITY: &str = "selectedImageQuality";
pub const LAYOUT_MODE: &str = "layoutMode";
pub const ADVANCED_MODE: &str = "advancedMode";
pub const CONTENT_PROTECTION: &str = "contentProtection";
pub const THROTTLE_TOKENS: &str = "throttleTokens";
pub const MAX_TOKENS_PER_MIN: &str = "maxTokensPerMin";
pub const THROTTLE_AT_PERCENT: &str = "throttleAtPercent";
pub const FONT_SIZE: &str = "fontSize";
pub const AUDIO_MODE: &str = "audioMode";
pub const STEALTH_LEVEL: &str = "stealthLevel";
pub const API_KEY: &str = "apiKey";
pub const ONBOARDING_COMPLETED: &str = "onboardingCompleted";
pub const SAVED_RESPONSES: &str = "savedResponses";
