//! services/api/src/adapters/completion.rs
//!
//! The adapter for the external generative completion service. It implements
//! the `DuaCompletionService` port from the `core` crate using an
//! OpenAI-compatible chat-completion endpoint.

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use guidance_core::domain::{DuaEntry, DuaSource};
use guidance_core::ports::{CompletionReply, DuaCompletionService, PortError, PortResult};
use regex::Regex;
use serde::Deserialize;

const SYSTEM_INSTRUCTIONS: &str = "You are an Islamic assistant. Given a user need, return a \
concise dua or surah snippet with Arabic, transliteration, translation, and a short context. \
Keep it brief (~80 words). Only respond with Islamic supplications; if unsure, say you are \
not sure.";

const USER_INPUT_TEMPLATE: &str = r#"User request: "{query}"
Respond as compact JSON: {"title":"","category":"","arabic":"","transliteration":"","translation":"","meaning":""}"#;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `DuaCompletionService` using an
/// OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiDuaAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

/// The compact structured reply the instruction template asks for.
#[derive(Deserialize)]
struct CompletionPayload {
    #[serde(default)]
    title: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    arabic: String,
    #[serde(default)]
    transliteration: String,
    #[serde(default)]
    translation: String,
    #[serde(default)]
    meaning: String,
}

impl CompletionPayload {
    /// A usable reply needs at least a title and Arabic text before it may
    /// be surfaced to a client.
    fn into_entry(self) -> Option<DuaEntry> {
        if self.title.trim().is_empty() || self.arabic.trim().is_empty() {
            return None;
        }
        Some(DuaEntry {
            title: self.title,
            category: self.category,
            arabic: self.arabic,
            transliteration: self.transliteration,
            translation: self.translation,
            meaning: self.meaning,
            keywords: Vec::new(),
            source: DuaSource::Ai,
        })
    }
}

impl OpenAiDuaAdapter {
    /// Creates a new `OpenAiDuaAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String, timeout: Duration) -> Self {
        Self {
            client,
            model,
            timeout,
        }
    }

    /// Parses the model's reply: straight JSON first, then the first
    /// brace-delimited substring, else the raw text is relayed unstructured.
    fn parse_reply(text: &str) -> CompletionReply {
        if let Some(entry) = Self::parse_structured(text) {
            return CompletionReply::Structured(entry);
        }

        let brace_regex = Regex::new(r"(?s)\{.*\}").unwrap();
        if let Some(found) = brace_regex.find(text) {
            if let Some(entry) = Self::parse_structured(found.as_str()) {
                return CompletionReply::Structured(entry);
            }
        }

        CompletionReply::Unstructured(text.trim().to_string())
    }

    fn parse_structured(text: &str) -> Option<DuaEntry> {
        serde_json::from_str::<CompletionPayload>(text.trim())
            .ok()
            .and_then(CompletionPayload::into_entry)
    }
}

//=========================================================================================
// `DuaCompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DuaCompletionService for OpenAiDuaAdapter {
    async fn complete_dua(&self, query: &str) -> PortResult<CompletionReply> {
        let user_input = USER_INPUT_TEMPLATE.replace("{query}", query);

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_input)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(0.3)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // The call is bounded so a stalled upstream cannot hold a request
        // open indefinitely.
        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| PortError::Unavailable("completion request timed out".to_string()))?
            .map_err(|e: OpenAIError| PortError::Unavailable(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected("completion reply contained no text content".to_string())
            })?;

        Ok(Self::parse_reply(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_json_parses() {
        let text = r#"{"title":"For Rain","category":"Weather","arabic":"اللهم اسقنا","transliteration":"Allahumma asqina","translation":"O Allah, give us rain.","meaning":"Asking for rain."}"#;
        match OpenAiDuaAdapter::parse_reply(text) {
            CompletionReply::Structured(entry) => {
                assert_eq!(entry.title, "For Rain");
                assert_eq!(entry.source, DuaSource::Ai);
            }
            other => panic!("expected structured reply, got {other:?}"),
        }
    }

    #[test]
    fn json_wrapped_in_prose_is_extracted() {
        let text = "Sure! Here is a dua:\n```json\n{\"title\":\"For Rain\",\"arabic\":\"اللهم اسقنا\"}\n```\nHope this helps.";
        match OpenAiDuaAdapter::parse_reply(text) {
            CompletionReply::Structured(entry) => assert_eq!(entry.title, "For Rain"),
            other => panic!("expected structured reply, got {other:?}"),
        }
    }

    #[test]
    fn empty_arabic_is_unusable() {
        let text = r#"{"title":"Something","arabic":""}"#;
        assert!(matches!(
            OpenAiDuaAdapter::parse_reply(text),
            CompletionReply::Unstructured(_)
        ));
    }

    #[test]
    fn plain_prose_is_relayed_unstructured() {
        let text = "  I am not sure about that request.  ";
        match OpenAiDuaAdapter::parse_reply(text) {
            CompletionReply::Unstructured(message) => {
                assert_eq!(message, "I am not sure about that request.");
            }
            other => panic!("expected unstructured reply, got {other:?}"),
        }
    }
}
