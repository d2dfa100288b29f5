//! Data models shared across the client.

pub mod archive;
pub mod options;
pub mod saved;

pub use archive::{ConversationSession, ConversationTurn, TurnPart};
pub use options::{
    profile_label, AudioMode, ImageQuality, Language, LayoutMode, Profile, ScreenshotInterval,
    SettingOption, StealthLevel,
};
pub use saved::SavedResponse;
