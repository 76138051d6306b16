//! Content pillars: the five fixed post categories and how a batch is spread across them.

use serde::Serialize;
use tracing::warn;

/// One fixed content category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentPillar {
    pub name: &'static str,
    pub prompt: &'static str,
    pub cta: &'static str,
    pub hashtags: &'static str,
}

/// The pillar table, in rotation order.
pub const PILLARS: [ContentPillar; 5] = [
    ContentPillar {
        name: "Educational",
        prompt: "Create a LinkedIn post about business automation tips for small businesses. \
                 Include specific, actionable advice that entrepreneurs can implement immediately. \
                 Focus on saving time and reducing manual work. Make it helpful and authoritative \
                 with a professional tone. Include 1-2 relevant emojis.",
        cta: "Download my automation checklist →",
        hashtags: "#automation #smallbusiness #productivity #tips #efficiency",
    },
    ContentPillar {
        name: "Showcase",
        prompt: "Create a behind-the-scenes LinkedIn post showing off an n8n automation workflow \
                 that just completed a task. Mention specific tools used, time saved, and the \
                 seamless integration. Build excitement about automation capabilities. Include 1-2 \
                 relevant emojis and maintain credibility.",
        cta: "Get your free automation audit →",
        hashtags: "#n8n #automation #behindthescenes #workflow #productivity",
    },
    ContentPillar {
        name: "Social Proof",
        prompt: "Create a LinkedIn post about a client success story (keep client anonymous). \
                 Focus on specific before/after transformation, quantifiable results achieved, and \
                 business impact. Make it credible and inspiring without revealing client \
                 identity. Include 1-2 relevant emojis.",
        cta: "Read more success stories →",
        hashtags: "#clientsuccess #automation #results #transformation #roi",
    },
    ContentPillar {
        name: "Tips",
        prompt: "Create a LinkedIn post with a quick automation tip that business owners can \
                 implement today. Make it immediately actionable, simple to understand, and focused \
                 on solving a common pain point. Use a helpful, expert tone with 1-2 relevant \
                 emojis.",
        cta: "Get your automation toolkit →",
        hashtags: "#quickwin #automation #productivity #tips #businesshack",
    },
    ContentPillar {
        name: "Industry Insights",
        prompt: "Create a LinkedIn post about current trends in business automation for 2025. \
                 Include forward-looking insights, emerging technologies, and practical \
                 implications for businesses. Position as a thought leader with industry \
                 expertise. Include 1-2 relevant emojis.",
        cta: "Stay ahead with my automation insights →",
        hashtags: "#automation #2025trends #businessinnovation #futureofwork #productivity",
    },
];

/// Index of the first pillar whose name matches `name`, ignoring case.
pub fn find_pillar(name: &str) -> Option<usize> {
    PILLARS
        .iter()
        .position(|pillar| pillar.name.to_lowercase() == name.to_lowercase())
}

/// Decides which pillar governs each position of a batch.
///
/// With a focus area every item uses the matching pillar; an unknown focus area
/// pins the whole batch to the first pillar. Without one, items rotate through
/// the table by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillarSelector {
    Rotate,
    Fixed(usize),
}

impl PillarSelector {
    pub fn new(focus_area: Option<&str>) -> Self {
        match focus_area {
            None => PillarSelector::Rotate,
            Some(area) => match find_pillar(area) {
                Some(index) => PillarSelector::Fixed(index),
                None => {
                    warn!(focus_area = area, "Unknown focus area, using first pillar");
                    PillarSelector::Fixed(0)
                }
            },
        }
    }

    pub fn index_for(&self, position: usize) -> usize {
        match self {
            PillarSelector::Rotate => position % PILLARS.len(),
            PillarSelector::Fixed(index) => *index,
        }
    }

    pub fn pillar_for(&self, position: usize) -> &'static ContentPillar {
        &PILLARS[self.index_for(position)]
    }
}
