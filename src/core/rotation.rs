//! Rotating message list
//!
//! Cycles through admin-provided messages (server rules by default), moving to
//! the next one at most once per interval no matter how often it is polled.
//! The caller supplies "now" so the advance check can be tested without
//! sleeping.

use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use super::config_source::{ConfigResource, ConfigSource, ConfigSourceError};

/// Returned by `get_current` when nothing is loaded
pub const NO_RULES_TEXT: &str = "No rules loaded";

/// Messages written when the rules file does not exist
pub const DEFAULT_MESSAGES: [&str; 4] = [
    "No teamkilling allowed",
    "Respect all players",
    "Follow staff instructions",
    "Have fun!",
];

/// List-item markers stripped from the start of a line
const ITEM_MARKERS: [&str; 3] = ["- ", "* ", "• "];

#[derive(Debug, Clone)]
pub struct RotatingMessageList {
    messages: Vec<String>,
    /// Always in `[0, len)` while `messages` is non-empty
    index: usize,
    last_advance: Instant,
}

impl RotatingMessageList {
    /// Create an empty list
    pub fn new(now: Instant) -> Self {
        Self {
            messages: Vec::new(),
            index: 0,
            last_advance: now,
        }
    }

    /// Create a list showing `messages[0]` from `now`
    pub fn from_messages<I, S>(messages: I, now: Instant) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
            index: 0,
            last_advance: now,
        }
    }

    /// Parse message lines: trims, strips list markers, skips blanks
    pub fn parse_messages(contents: &str) -> Vec<String> {
        contents
            .lines()
            .map(|line| {
                let mut line = line.trim();
                if line == "-" || line == "*" || line == "•" {
                    return "";
                }
                for marker in ITEM_MARKERS {
                    if let Some(rest) = line.strip_prefix(marker) {
                        line = rest.trim();
                        break;
                    }
                }
                line
            })
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Contents of a freshly generated rules file
    pub fn default_file_contents() -> String {
        let mut contents = DEFAULT_MESSAGES.join("\n");
        contents.push('\n');
        contents
    }

    /// Replace the messages from the rules resource
    ///
    /// The index and the advance timestamp are reset first, so the first
    /// message is shown immediately. A missing resource is created with the
    /// default messages and then loaded like any other file.
    pub fn load(
        &mut self,
        source: &dyn ConfigSource,
        now: Instant,
    ) -> Result<(), ConfigSourceError> {
        self.messages.clear();
        self.index = 0;
        self.last_advance = now;

        let contents = match source.read(ConfigResource::Rules)? {
            Some(contents) => contents,
            None => {
                let contents = Self::default_file_contents();
                match source.write(ConfigResource::Rules, &contents) {
                    Ok(()) => info!("[RULES] Created default rules file"),
                    Err(e) => error!(error = %e, "[RULES] Failed to create default rules file"),
                }
                contents
            }
        };

        self.messages = Self::parse_messages(&contents);
        debug!(count = self.messages.len(), "[RULES] Loaded rules");
        Ok(())
    }

    /// Current message, advancing first if `interval` has elapsed since the
    /// last advance
    pub fn get_current(&mut self, interval: Duration, now: Instant) -> &str {
        if self.messages.is_empty() {
            return NO_RULES_TEXT;
        }

        if now.saturating_duration_since(self.last_advance) >= interval {
            self.index = (self.index + 1) % self.messages.len();
            self.last_advance = now;
        }

        &self.messages[self.index]
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
