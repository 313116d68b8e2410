use serde::Serialize;
use voyage_core::{
    compose_phrase_reply, parse_preference_phrase, validate_preferences, ActivityTag, GoalTag,
    Preferences, ValidationError, VibeTag, MIN_PREFERENCE_TAGS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferencesForm {
    preferences: Preferences,
    chat: Vec<ChatMessage>,
}

impl PreferencesForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: Preferences) -> Self {
        Self {
            preferences,
            chat: Vec::new(),
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    pub fn toggle_vibe(&mut self, tag: VibeTag) -> bool {
        self.preferences.toggle_vibe(tag)
    }

    pub fn toggle_activity(&mut self, tag: ActivityTag) -> bool {
        self.preferences.toggle_activity(tag)
    }

    pub fn toggle_goal(&mut self, tag: GoalTag) -> bool {
        self.preferences.toggle_goal(tag)
    }

    /// Applies a free-text description: matched tags are added to the current
    /// selection and the assistant reply is appended to the chat. Blank input
    /// is ignored.
    pub fn describe(&mut self, text: &str) -> Option<&str> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let matched = parse_preference_phrase(text);
        self.preferences.merge(&matched);

        self.chat.push(ChatMessage {
            role: ChatRole::User,
            text: text.to_string(),
        });
        self.chat.push(ChatMessage {
            role: ChatRole::Assistant,
            text: compose_phrase_reply(&matched),
        });
        self.chat.last().map(|message| message.text.as_str())
    }

    pub fn selected_count(&self) -> usize {
        self.preferences.total_tags()
    }

    /// How many more tags are needed before the form can be submitted.
    pub fn remaining(&self) -> usize {
        MIN_PREFERENCE_TAGS.saturating_sub(self.selected_count())
    }

    pub fn is_valid(&self) -> bool {
        self.remaining() == 0
    }

    pub fn submit(&self) -> Result<Preferences, ValidationError> {
        validate_preferences(&self.preferences)?;
        Ok(self.preferences.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_three_tags_unlocks_submit() {
        let mut form = PreferencesForm::new();
        form.toggle_vibe(VibeTag::Luxury);
        form.toggle_activity(ActivityTag::Water);
        assert_eq!(form.remaining(), 1);
        assert!(form.submit().is_err());

        form.toggle_goal(GoalTag::Romance);
        assert!(form.is_valid());
        assert_eq!(form.submit().unwrap().total_tags(), 3);
    }

    #[test]
    fn phrase_merges_into_existing_selection() {
        let mut form = PreferencesForm::new();
        form.toggle_vibe(VibeTag::Luxury);

        let reply = form
            .describe("I want a romantic getaway with amazing food")
            .unwrap()
            .to_string();
        assert!(reply.starts_with("Perfect!"));
        assert!(form.preferences().vibe.contains(&VibeTag::Luxury));
        assert!(form.preferences().vibe.contains(&VibeTag::Foodie));
        assert!(form.preferences().goals.contains(&GoalTag::Romance));
        assert_eq!(form.chat().len(), 2);
        assert_eq!(form.chat()[0].role, ChatRole::User);
    }

    #[test]
    fn blank_phrase_is_ignored() {
        let mut form = PreferencesForm::new();
        assert!(form.describe("   ").is_none());
        assert!(form.chat().is_empty());
    }
}
