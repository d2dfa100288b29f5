//! Typed preference access.
//!
//! [`Preferences`] wraps a [`KeyValueStore`] and gives every setting a
//! typed getter with a default and a setter. Each key is owned by exactly
//! one control, so writes are last-write-wins.

pub mod keys;
mod store;

pub use store::{FileStore, KeyValueStore, PreferenceError, PREFERENCES_FILE};

use std::ops::RangeInclusive;

use tracing::{debug, warn};

use crate::models::{
    AudioMode, ImageQuality, Language, LayoutMode, Profile, SavedResponse, ScreenshotInterval,
    SettingOption, StealthLevel,
};

pub const MAX_TOKENS_RANGE: RangeInclusive<u32> = 1_000..=10_000_000;
pub const DEFAULT_MAX_TOKENS_PER_MIN: u32 = 1_000_000;
pub const THROTTLE_PERCENT_RANGE: RangeInclusive<u8> = 50..=95;
pub const DEFAULT_THROTTLE_AT_PERCENT: u8 = 75;
pub const FONT_SIZE_RANGE: RangeInclusive<u8> = 12..=32;
pub const DEFAULT_FONT_SIZE: u8 = 18;
/// Shown when a stored font size cannot be parsed.
pub const FALLBACK_FONT_SIZE: u8 = 20;

/// Typed wrapper over a key-value store.
pub struct Preferences {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("keys", &self.store.keys())
            .finish()
    }
}

impl Preferences {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    fn option<T: SettingOption>(&self, key: &str) -> T {
        self.store
            .get(key)
            .map(|v| T::parse_or_default(&v))
            .unwrap_or_default()
    }

    fn set_option<T: SettingOption>(&mut self, key: &str, value: T) -> Result<(), PreferenceError> {
        self.store.set(key, value.as_str())
    }

    fn number<T: std::str::FromStr + PartialOrd + Copy>(
        &self,
        key: &str,
        default: T,
        range: &RangeInclusive<T>,
    ) -> T {
        self.store
            .get(key)
            .and_then(|v| v.trim().parse::<T>().ok())
            .map(|v| clamp(v, range))
            .unwrap_or(default)
    }

    pub fn profile(&self) -> Profile {
        self.option(keys::SELECTED_PROFILE)
    }

    pub fn set_profile(&mut self, profile: Profile) -> Result<(), PreferenceError> {
        self.set_option(keys::SELECTED_PROFILE, profile)
    }

    pub fn language(&self) -> Language {
        self.option(keys::SELECTED_LANGUAGE)
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), PreferenceError> {
        self.set_option(keys::SELECTED_LANGUAGE, language)
    }

    pub fn screenshot_interval(&self) -> ScreenshotInterval {
        self.option(keys::SCREENSHOT_INTERVAL)
    }

    pub fn set_screenshot_interval(
        &mut self,
        interval: ScreenshotInterval,
    ) -> Result<(), PreferenceError> {
        self.set_option(keys::SCREENSHOT_INTERVAL, interval)
    }

    pub fn image_quality(&self) -> ImageQuality {
        self.option(keys::IMAGE_QUALITY)
    }

    pub fn set_image_quality(&mut self, quality: ImageQuality) -> Result<(), PreferenceError> {
        self.set_option(keys::IMAGE_QUALITY, quality)
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.option(keys::LAYOUT_MODE)
    }

    pub fn set_layout_mode(&mut self, mode: LayoutMode) -> Result<(), PreferenceError> {
        self.set_option(keys::LAYOUT_MODE, mode)
    }

    pub fn audio_mode(&self) -> AudioMode {
        self.option(keys::AUDIO_MODE)
    }

    pub fn set_audio_mode(&mut self, mode: AudioMode) -> Result<(), PreferenceError> {
        self.set_option(keys::AUDIO_MODE, mode)
    }

    pub fn stealth_level(&self) -> StealthLevel {
        self.option(keys::STEALTH_LEVEL)
    }

    pub fn set_stealth_level(&mut self, level: StealthLevel) -> Result<(), PreferenceError> {
        self.set_option(keys::STEALTH_LEVEL, level)
    }

    /// Defaults to off; only the literal `"true"` enables it.
    pub fn advanced_mode(&self) -> bool {
        self.store.get(keys::ADVANCED_MODE).as_deref() == Some("true")
    }

    pub fn set_advanced_mode(&mut self, enabled: bool) -> Result<(), PreferenceError> {
        self.store.set(keys::ADVANCED_MODE, bool_str(enabled))
    }

    /// Defaults to on; only the literal `"false"` disables it.
    pub fn content_protection(&self) -> bool {
        self.store.get(keys::CONTENT_PROTECTION).as_deref() != Some("false")
    }

    pub fn set_content_protection(&mut self, enabled: bool) -> Result<(), PreferenceError> {
        self.store.set(keys::CONTENT_PROTECTION, bool_str(enabled))
    }

    pub fn throttle_tokens(&self) -> bool {
        self.store.get(keys::THROTTLE_TOKENS).as_deref() == Some("true")
    }

    pub fn set_throttle_tokens(&mut self, enabled: bool) -> Result<(), PreferenceError> {
        self.store.set(keys::THROTTLE_TOKENS, bool_str(enabled))
    }

    pub fn max_tokens_per_min(&self) -> u32 {
        self.number(
            keys::MAX_TOKENS_PER_MIN,
            DEFAULT_MAX_TOKENS_PER_MIN,
            &MAX_TOKENS_RANGE,
        )
    }

    /// Stores the value clamped to [`MAX_TOKENS_RANGE`].
    pub fn set_max_tokens_per_min(&mut self, value: u32) -> Result<(), PreferenceError> {
        let value = clamp(value, &MAX_TOKENS_RANGE);
        self.store.set(keys::MAX_TOKENS_PER_MIN, &value.to_string())
    }

    pub fn throttle_at_percent(&self) -> u8 {
        self.number(
            keys::THROTTLE_AT_PERCENT,
            DEFAULT_THROTTLE_AT_PERCENT,
            &THROTTLE_PERCENT_RANGE,
        )
    }

    pub fn set_throttle_at_percent(&mut self, value: u8) -> Result<(), PreferenceError> {
        let value = clamp(value, &THROTTLE_PERCENT_RANGE);
        self.store.set(keys::THROTTLE_AT_PERCENT, &value.to_string())
    }

    /// Missing means the default; present but unparsable reads as
    /// [`FALLBACK_FONT_SIZE`].
    pub fn font_size(&self) -> u8 {
        match self.store.get(keys::FONT_SIZE) {
            None => DEFAULT_FONT_SIZE,
            Some(raw) => raw
                .trim()
                .parse::<u8>()
                .map(|v| clamp(v, &FONT_SIZE_RANGE))
                .unwrap_or(FALLBACK_FONT_SIZE),
        }
    }

    pub fn set_font_size(&mut self, size: u8) -> Result<(), PreferenceError> {
        let size = clamp(size, &FONT_SIZE_RANGE);
        self.store.set(keys::FONT_SIZE, &size.to_string())
    }

    pub fn api_key(&self) -> String {
        self.store.get(keys::API_KEY).unwrap_or_default()
    }

    pub fn set_api_key(&mut self, key: &str) -> Result<(), PreferenceError> {
        self.store.set(keys::API_KEY, key)
    }

    pub fn onboarding_completed(&self) -> bool {
        self.store.get(keys::ONBOARDING_COMPLETED).is_some()
    }

    pub fn set_onboarding_completed(&mut self) -> Result<(), PreferenceError> {
        self.store.set(keys::ONBOARDING_COMPLETED, "true")
    }

    /// Saved responses, oldest first. Malformed JSON reads as empty.
    pub fn saved_responses(&self) -> Vec<SavedResponse> {
        let Some(raw) = self.store.get(keys::SAVED_RESPONSES) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                warn!("Saved responses are malformed, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    fn write_saved(&mut self, saved: &[SavedResponse]) -> Result<(), PreferenceError> {
        let json = serde_json::to_string(saved)?;
        self.store.set(keys::SAVED_RESPONSES, &json)
    }

    /// Save a response. Returns `Ok(false)` without writing when the same
    /// text is already saved.
    pub fn save_response(&mut self, text: &str, profile: Profile) -> Result<bool, PreferenceError> {
        let mut saved = self.saved_responses();
        if saved.iter().any(|s| s.same_text(text)) {
            debug!("Response already saved, skipping");
            return Ok(false);
        }
        saved.push(SavedResponse::new(text, profile.as_str()));
        self.write_saved(&saved)?;
        Ok(true)
    }

    /// Remove the saved response at `index`. Returns `Ok(false)` when out of range.
    pub fn delete_saved_response(&mut self, index: usize) -> Result<bool, PreferenceError> {
        let mut saved = self.saved_responses();
        if index >= saved.len() {
            return Ok(false);
        }
        saved.remove(index);
        self.write_saved(&saved)?;
        Ok(true)
    }

    /// Remove every key except the onboarding flag.
    pub fn clear_all_data(&mut self) -> Result<(), PreferenceError> {
        for key in self.store.keys() {
            if key != keys::ONBOARDING_COMPLETED {
                self.store.remove(&key)?;
            }
        }
        Ok(())
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn clamp<T: PartialOrd + Copy>(value: T, range: &RangeInclusive<T>) -> T {
    if value < *range.start() {
        *range.start()
    } else if value > *range.end() {
        *range.end()
    } else {
        value
    }
}
