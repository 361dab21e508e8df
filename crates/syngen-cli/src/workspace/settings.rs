use std::path::Path;

use syngen_core::timestamp::DayBoundary;
use syngen_generate::GenerateOptions;

use super::WorkspaceResult;

/// Read generation settings from a TOML file.
///
/// Missing keys take their value from [`GenerateOptions::default`].
pub fn load_settings(path: &Path) -> WorkspaceResult<GenerateOptions> {
    let content = std::fs::read_to_string(path)?;
    let options: GenerateOptions = toml::from_str(&content)?;
    Ok(options)
}

/// Values given on the command line; each one replaces the settings value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOverrides {
    pub users: Option<usize>,
    pub channels: Option<usize>,
    pub messages: Option<usize>,
    pub thread_probability: Option<f64>,
    pub seed: Option<u64>,
    pub utc: bool,
}

impl GenerateOverrides {
    pub fn apply(&self, options: &mut GenerateOptions) {
        if let Some(users) = self.users {
            options.users = users;
        }
        if let Some(channels) = self.channels {
            options.channels = channels;
        }
        if let Some(messages) = self.messages {
            options.messages = messages;
        }
        if let Some(probability) = self.thread_probability {
            options.thread_probability = probability;
        }
        if let Some(seed) = self.seed {
            options.seed = Some(seed);
        }
        if self.utc {
            options.day_boundary = DayBoundary::Utc;
        }
    }
}
