//! Preset prompt templates, keyed by collection id.

use crate::config::DEFAULT_BLOG_COLLECTION_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetPrompt {
    pub id: &'static str,
    pub name: &'static str,
    pub template: &'static str,
    pub description: &'static str,
}

pub const BLOG_PRESET: PresetPrompt = PresetPrompt {
    id: DEFAULT_BLOG_COLLECTION_ID,
    name: "Blog Post",
    template: "Write a comprehensive blog post about [TOPIC]. The post should be engaging, informative, and optimized for SEO.

Structure the content as follows:
- Start with a compelling introduction that hooks the reader
- Include 3-5 main sections with clear headings
- Provide relevant examples and actionable insights
- Add a conclusion that encourages reader engagement

Requirements:
- Target word count: [WORD_COUNT] words
- Include relevant keywords naturally throughout the content
- Write in a [TONE] tone (professional, conversational, etc.)
- Ensure the content provides real value to readers interested in [TOPIC]

Please customize this template with your specific topic, target audience, and requirements.",
    description: "Template for creating engaging blog posts with SEO optimization",
};

pub const DEFAULT_PRESET: PresetPrompt = PresetPrompt {
    id: "default",
    name: "General Content",
    template: "Create content for [PURPOSE] that is professional, clear, and aligned with our brand voice.

Content Requirements:
- Target audience: [TARGET_AUDIENCE]
- Content type: [CONTENT_TYPE] (webpage, product description, etc.)
- Tone: [TONE] (professional, friendly, authoritative, etc.)
- Key message: [KEY_MESSAGE]

Structure:
- Clear and compelling headline
- Well-organized sections with logical flow
- Include relevant examples or use cases
- Call-to-action that drives desired user behavior

Please customize this template with your specific purpose, audience, and content requirements.",
    description: "General template for various content creation needs",
};

/// All presets, default last
pub const PRESET_PROMPTS: &[PresetPrompt] = &[BLOG_PRESET, DEFAULT_PRESET];

/// Preset for a collection id, falling back to the general template
pub fn preset_for(collection_id: &str) -> &'static PresetPrompt {
    PRESET_PROMPTS
        .iter()
        .find(|p| p.id == collection_id)
        .unwrap_or(&DEFAULT_PRESET)
}
