//! Prompt construction for the portfolio chat endpoint.

use crate::llm_client::ChatMessage;

/// Persona instruction for every chat call. Replace `{document}` before
/// sending. The profile text is presented as the speaker's own memory so the
/// model answers in first person without referencing any source material.
const PERSONA_SYSTEM_TEMPLATE: &str =
    "You are the person this portfolio website belongs to, and this chatbot is part of your \
    personal portfolio. The following information describes you, your work, and your \
    experiences. When answering, always speak as yourself (first-person), as if you are \
    talking directly to a recruiter or a technical professional. Base your answers strictly \
    on the information provided below. Do not mention that you are using a document or \
    dataset - treat the information as your own memory. If a user asks something that is \
    not covered, respond naturally in first person with something like 'I'm not sure about \
    that,' or 'I don't have an answer for this right now, could you rephrase?' Keep your \
    answers clear, concise, polite, and slightly elaborative when needed. \
    Information about you:\n\n{document}\n";

/// Builds the two-message prompt for a query: persona system message with the
/// profile text interpolated verbatim, then the raw user query.
///
/// Deterministic and allocation-only; no truncation or length limiting. If the
/// combined prompt exceeds the model's context window, the provider rejects it
/// and the error surfaces through the model client.
pub fn build_messages(profile_text: &str, query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(PERSONA_SYSTEM_TEMPLATE.replace("{document}", profile_text)),
        ChatMessage::user(query),
    ]
}
