//! Prompt construction for the chat-completion API
//!
//! Builds the two-message sequence sent to the provider: a fixed system
//! instruction and a templated user message. Templates are embedded at
//! compile time and use `{{VARIABLE}}` placeholders.

use serde::{Deserialize, Serialize};

use crate::style::Style;

/// Fixed system instruction, identical for every style
const SYSTEM_PROMPT: &str = include_str!("prompt/system.md");

/// User message template with {{REVIEW}}, {{STYLE}}, and {{RUBRIC}} slots
const USER_TEMPLATE: &str = include_str!("prompt/user.md");

/// Message author role understood by the completion API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single chat message in provider wire format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Build the ordered message pair for one rewrite request.
///
/// The review text is embedded verbatim; an empty review produces a
/// degenerate prompt rather than an error, matching the form's
/// pass-through behavior.
pub fn build_messages(review_text: &str, style: Style) -> Vec<ChatMessage> {
    let user = USER_TEMPLATE
        .replace("{{REVIEW}}", review_text)
        .replace("{{STYLE}}", style.label())
        .replace("{{RUBRIC}}", style.instructions().trim());

    vec![
        ChatMessage {
            role: Role::System,
            content: SYSTEM_PROMPT.trim().to_string(),
        },
        ChatMessage {
            role: Role::User,
            content: user.trim().to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_two_messages() {
        let messages = build_messages("Solid build quality.", Style::Expand);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn test_user_message_embeds_inputs() {
        let messages = build_messages("Great product, fast shipping.", Style::Shorten);
        let user = &messages[1].content;
        assert!(user.contains("Great product, fast shipping."));
        assert!(user.contains("Shorten"));
        assert!(user.contains(Style::Shorten.instructions().trim()));
    }

    #[test]
    fn test_system_message_identical_across_styles() {
        let shorten = build_messages("text", Style::Shorten);
        for style in Style::all() {
            let messages = build_messages("text", *style);
            assert_eq!(messages[0].content, shorten[0].content);
        }
    }

    #[test]
    fn test_empty_review_passes_through() {
        let messages = build_messages("", Style::AutoImprove);
        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.contains("Review:"));
    }

    #[test]
    fn test_no_unresolved_placeholders() {
        let messages = build_messages("A review.", Style::ProfessionalTone);
        for message in &messages {
            assert!(!message.content.contains("{{"));
        }
    }

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&ChatMessage {
            role: Role::System,
            content: "hi".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"role":"system","content":"hi"}"#);
    }
}
