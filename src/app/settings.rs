//! Customize and advanced settings forms.
//!
//! Every change is written straight through to the preference store, which
//! clamps numeric values. Each row owns exactly one key.

use tracing::{info, warn};

use super::{step_index, AdvancedField, App, CustomizeField};
use crate::bridge::HostRequest;
use crate::models::SettingOption;

/// Step applied to the tokens-per-minute limit.
pub const MAX_TOKENS_STEP: u32 = 100_000;

/// Step applied to the throttle percentage.
pub const THROTTLE_PERCENT_STEP: u8 = 5;

impl App {
    pub fn customize_field(&self) -> CustomizeField {
        CustomizeField::ALL[self.customize_focus.min(CustomizeField::ALL.len() - 1)]
    }

    /// Rows of the advanced form; the limits only show while throttling.
    pub fn advanced_fields(&self) -> Vec<AdvancedField> {
        let throttling = self.preferences.throttle_tokens();
        AdvancedField::ALL
            .iter()
            .copied()
            .filter(|f| throttling || !f.needs_throttling())
            .collect()
    }

    pub fn advanced_field(&self) -> AdvancedField {
        let fields = self.advanced_fields();
        fields
            .get(self.advanced_focus)
            .or(fields.last())
            .copied()
            .unwrap_or_default()
    }

    /// Move the focused row.
    pub fn settings_focus(&mut self, forward: bool) {
        match self.view {
            super::View::Customize => {
                self.customize_focus =
                    step_index(self.customize_focus, CustomizeField::ALL.len(), forward);
            }
            super::View::Advanced => {
                let len = self.advanced_fields().len();
                self.advanced_focus = step_index(self.advanced_focus, len, forward);
                self.confirm_clear = false;
            }
            _ => return,
        }
        self.mark_dirty();
    }

    /// Change the focused row's value.
    pub fn settings_change(&mut self, forward: bool) {
        match self.view {
            super::View::Customize => self.change_customize(forward),
            super::View::Advanced => self.change_advanced(forward),
            _ => return,
        }
        self.mark_dirty();
    }

    /// Enter/space on the focused row: toggles and actions.
    pub fn settings_activate(&mut self) {
        match self.view {
            super::View::Customize => self.change_customize(true),
            super::View::Advanced => {
                if self.advanced_field() == AdvancedField::ClearData {
                    self.request_clear_all_data();
                } else {
                    self.change_advanced(true);
                }
            }
            _ => return,
        }
        self.mark_dirty();
    }

    fn change_customize(&mut self, forward: bool) {
        let field = self.customize_field();
        let prefs = &mut self.preferences;
        let result = match field {
            CustomizeField::Profile => {
                let p = prefs.profile();
                prefs.set_profile(if forward { p.next() } else { p.prev() })
            }
            CustomizeField::Language => {
                let l = prefs.language();
                prefs.set_language(if forward { l.next() } else { l.prev() })
            }
            CustomizeField::ScreenshotInterval => {
                let i = prefs.screenshot_interval();
                prefs.set_screenshot_interval(if forward { i.next() } else { i.prev() })
            }
            CustomizeField::ImageQuality => {
                let q = prefs.image_quality();
                prefs.set_image_quality(if forward { q.next() } else { q.prev() })
            }
            CustomizeField::LayoutMode => {
                let m = prefs.layout_mode();
                let next = if forward { m.next() } else { m.prev() };
                self.set_layout_mode(next);
                return;
            }
            CustomizeField::AdvancedMode => {
                let enabled = !prefs.advanced_mode();
                prefs.set_advanced_mode(enabled)
            }
        };
        self.persist(result);
    }

    fn change_advanced(&mut self, forward: bool) {
        let field = self.advanced_field();
        let prefs = &mut self.preferences;
        let result = match field {
            AdvancedField::ContentProtection => {
                let enabled = !prefs.content_protection();
                let result = prefs.set_content_protection(enabled);
                self.request(HostRequest::UpdateContentProtection { enabled });
                result
            }
            AdvancedField::StealthLevel => {
                let s = prefs.stealth_level();
                let level = if forward { s.next() } else { s.prev() };
                let result = prefs.set_stealth_level(level);
                self.request(HostRequest::SetStealthLevel { level });
                result
            }
            AdvancedField::AudioMode => {
                let a = prefs.audio_mode();
                prefs.set_audio_mode(if forward { a.next() } else { a.prev() })
            }
            AdvancedField::ThrottleTokens => {
                let enabled = !prefs.throttle_tokens();
                prefs.set_throttle_tokens(enabled)
            }
            AdvancedField::MaxTokensPerMin => {
                let v = prefs.max_tokens_per_min();
                let v = if forward {
                    v.saturating_add(MAX_TOKENS_STEP)
                } else {
                    v.saturating_sub(MAX_TOKENS_STEP)
                };
                prefs.set_max_tokens_per_min(v)
            }
            AdvancedField::ThrottleAtPercent => {
                let v = prefs.throttle_at_percent();
                let v = if forward {
                    v.saturating_add(THROTTLE_PERCENT_STEP)
                } else {
                    v.saturating_sub(THROTTLE_PERCENT_STEP)
                };
                prefs.set_throttle_at_percent(v)
            }
            AdvancedField::FontSize => {
                let v = prefs.font_size();
                let v = if forward {
                    v.saturating_add(1)
                } else {
                    v.saturating_sub(1)
                };
                prefs.set_font_size(v)
            }
            AdvancedField::ClearData => return,
        };
        self.persist(result);
        // Hiding the limit rows can leave focus past the end
        self.advanced_focus = self
            .advanced_focus
            .min(self.advanced_fields().len().saturating_sub(1));
    }

    /// First press arms the confirmation, the second clears.
    fn request_clear_all_data(&mut self) {
        if self.confirm_clear {
            self.confirm_clear = false;
            self.clear_all_data();
        } else {
            self.confirm_clear = true;
        }
    }

    /// Remove settings, the API key, saved responses and archived history.
    /// Onboarding stays completed.
    pub fn clear_all_data(&mut self) {
        info!("Clearing all stored data");
        let result = self.preferences.clear_all_data();
        self.persist(result);
        if let Err(e) = self.archive.clear() {
            warn!("Failed to clear history: {}", e);
        }
        self.api_key_input.clear();
        self.history = Default::default();
        self.advanced_focus = 0;
        self.show_notice("All data has been cleared.");
    }
}
