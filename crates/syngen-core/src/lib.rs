//! Core contracts for syngen.
//!
//! This crate defines the chat workspace model (users, channels, messages and
//! their thread metadata), the JSON document records written to an export
//! tree, and the invariant checks shared by the generator, the evaluator and
//! the CLI.

pub mod document;
pub mod error;
pub mod model;
pub mod timestamp;
pub mod validation;

pub use document::{
    ChannelRecord, MessageRecord, ProfileRecord, ReplyRecord, TEAM_ID, UserRecord, avatar_url,
};
pub use error::{Error, Result};
pub use model::{Channel, Message, MessageType, Reply, User, Workspace};
pub use timestamp::Timestamp;
pub use validation::{
    AVATAR_HASH_LEN, MAX_EMAIL_LEN, MAX_ID_LEN, MAX_NAME_LEN, validate_workspace,
};

/// File name of the user directory document at the export root.
pub const USERS_FILE: &str = "users.json";
/// File name of the channel directory document at the export root.
pub const CHANNELS_FILE: &str = "channels.json";
