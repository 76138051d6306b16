//! Deterministic content served when the provider cannot be used.

use super::item::{timestamp_now, GeneratedItem};
use super::schedule::scheduled_slot;
use crate::pillar::ContentPillar;

/// Stand-in for a single item whose provider call failed.
pub fn fallback_item(pillar: &ContentPillar, position: usize) -> GeneratedItem {
    GeneratedItem {
        post_description: format!(
            "Automation insight {}: The key to scaling your business isn't working harder, \
             it's working smarter. Small automations compound into massive time savings. \
             What manual task is eating up your day? 🤔",
            position + 1
        ),
        instructions: "Fallback template post about automation benefits. Educational content \
                       focused on time savings and efficiency."
            .to_string(),
        pillar: pillar.name.to_string(),
        cta: pillar.cta.to_string(),
        hashtags: pillar.hashtags.to_string(),
        scheduled_for: scheduled_slot(position),
        generated_at: timestamp_now(),
        is_ai_generated: false,
    }
}

struct CannedPost {
    text: &'static str,
    instructions: &'static str,
    pillar: &'static str,
    cta: &'static str,
    hashtags: &'static str,
    scheduled_for: &'static str,
}

const CANNED_POSTS: [CannedPost; 2] = [
    CannedPost {
        text: "Automation transforms businesses by eliminating repetitive tasks and reducing \
               human error. The ROI speaks for itself when you see 20+ hours saved weekly. What \
               process would you automate first? 💡",
        instructions: "Educational fallback post about automation benefits and ROI.",
        pillar: "Educational",
        cta: "Get your automation assessment →",
        hashtags: "#automation #productivity #business #efficiency #roi",
        scheduled_for: "Monday 09:00",
    },
    CannedPost {
        text: "Just watched my n8n workflow automatically sync 500+ leads from LinkedIn to our \
               CRM, send personalized follow-ups, and update our tracking sheet. All while I \
               focused on strategic work. This is the power of thoughtful automation. 🚀",
        instructions: "Showcase fallback post demonstrating automation capabilities.",
        pillar: "Showcase",
        cta: "See my automation services →",
        hashtags: "#n8n #automation #crm #workflow #productivity",
        scheduled_for: "Wednesday 14:00",
    },
];

/// The fixed batch returned when the whole pipeline fails.
///
/// A known positive count trims the batch to its first `count` posts; an unknown
/// or zero count returns both.
pub fn canned_batch(count: Option<usize>) -> Vec<GeneratedItem> {
    let take = match count {
        Some(n) if n > 0 => n.min(CANNED_POSTS.len()),
        _ => CANNED_POSTS.len(),
    };
    let generated_at = timestamp_now();

    CANNED_POSTS[..take]
        .iter()
        .map(|post| GeneratedItem {
            post_description: post.text.to_string(),
            instructions: post.instructions.to_string(),
            pillar: post.pillar.to_string(),
            cta: post.cta.to_string(),
            hashtags: post.hashtags.to_string(),
            scheduled_for: post.scheduled_for.to_string(),
            generated_at: generated_at.clone(),
            is_ai_generated: false,
        })
        .collect()
}
