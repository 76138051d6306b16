//! Per-item drafting. A provider failure never escapes: it turns into a fallback item.

use super::fallback::fallback_item;
use super::item::{timestamp_now, GeneratedItem};
use super::schedule::scheduled_slot;
use crate::pillar::ContentPillar;
use crate::provider::{ChatMessage, CompletionOptions, ModelProviderClient};
use std::sync::Arc;
use tracing::{debug, error};

/// Tone, length and format rules shared by every drafted post.
pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert LinkedIn content creator specializing in business automation and n8n workflows. Create engaging posts that:

- Are 150-250 words (under 1300 characters total including spaces)
- Start with a compelling hook in the first line
- Provide genuine, actionable value
- Use a professional but conversational tone
- Include 1-2 relevant emojis naturally in the text (not excessive)
- Have clear structure with line breaks for readability
- End with engagement (question, call-to-action, or thought)
- Focus on automation, productivity, and business efficiency
- Sound authentic and personal, not corporate

Do NOT include hashtags in the post content - they will be added separately.
Return ONLY the post content, no additional commentary or formatting.";

/// Sampling settings for post drafts
pub fn completion_options() -> CompletionOptions {
    CompletionOptions {
        temperature: Some(0.8),
        max_tokens: Some(300),
        top_p: None,
        frequency_penalty: Some(0.1),
        presence_penalty: Some(0.1),
        stop: None,
    }
}

/// Processing notes attached to a drafted post for reviewers and the store.
pub fn instructions_for(pillar: &ContentPillar) -> String {
    format!(
        "AI-generated LinkedIn post focused on {} content about business automation.\n\
         Target audience: Small business owners, entrepreneurs, and decision-makers interested in automation solutions.\n\
         Tone: Professional, helpful, and engaging with practical value.\n\
         Content type: {} post designed to build authority and drive engagement.\n\
         Call-to-action: Include \"{}\" at the end.\n\
         Hashtags: Add \"{}\" after the main content.\n\
         Character limit: Keep total post under 1300 characters including hashtags and CTA.",
        pillar.name.to_lowercase(),
        pillar.name,
        pillar.cta,
        pillar.hashtags
    )
}

/// Drafts single posts through the configured provider.
#[derive(Clone)]
pub struct ItemGenerator {
    provider: Arc<dyn ModelProviderClient>,
}

impl ItemGenerator {
    pub fn new(provider: Arc<dyn ModelProviderClient>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn ModelProviderClient {
        self.provider.as_ref()
    }

    /// Draft the post at batch position `position` for `pillar`.
    pub async fn generate(&self, pillar: &ContentPillar, position: usize) -> GeneratedItem {
        let messages = vec![
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(pillar.prompt),
        ];

        match self.provider.complete(messages, completion_options()).await {
            Ok(response) => {
                debug!(
                    position,
                    pillar = pillar.name,
                    model = %response.model,
                    tokens = response.usage.total_tokens,
                    "Post drafted"
                );
                GeneratedItem {
                    post_description: response.content.trim().to_string(),
                    instructions: instructions_for(pillar),
                    pillar: pillar.name.to_string(),
                    cta: pillar.cta.to_string(),
                    hashtags: pillar.hashtags.to_string(),
                    scheduled_for: scheduled_slot(position),
                    generated_at: timestamp_now(),
                    is_ai_generated: true,
                }
            }
            Err(e) => {
                error!(
                    post = position + 1,
                    pillar = pillar.name,
                    provider = self.provider.provider_name(),
                    error = %e,
                    "Provider call failed, using fallback post"
                );
                fallback_item(pillar, position)
            }
        }
    }
}
