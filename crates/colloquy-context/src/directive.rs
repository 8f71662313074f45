// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System directive composition for the author persona.
//!
//! The directive is assembled from three parts in fixed order: a framing
//! block describing the group-chat setting and the bracketed-name
//! convention, the author persona (the book's stored template or a default
//! built from its metadata), and a spoiler guard synthesized from member
//! reading positions. The guard is omitted entirely when no member has
//! recorded progress.

use colloquy_core::{ClubOverview, MemberProgress};

/// Composes the full system directive for one club.
pub fn compose_directive(
    overview: &ClubOverview,
    roster: &[String],
    progress: &[MemberProgress],
) -> String {
    let author = &overview.book_author;
    let member_list = member_list_sentence(roster);
    let persona = persona_directive(overview);
    let guard = spoiler_guard(progress);

    format!(
        "=== CONTEXT: ABOUT COLLOQUY ===\n\
         You are participating in Colloquy, a social book club app where readers form \
         private clubs to discuss books together. Your role is to serve as an AI \
         representation of the author — a knowledgeable, engaging discussion partner who \
         helps readers explore the book more deeply.\n\
         \n\
         === YOUR ROLE ===\n\
         - You are the AI author persona for this book club. You represent {author}'s \
         perspective and voice.\n\
         - This is a GROUP book club called \"{club_name}\". Multiple real people may be \
         chatting with you and with each other.\n\
         - {member_list}\n\
         - Messages from club members are prefixed with their name in brackets, like \
         [Sarah]: or [Mike]:. Address members by name when responding to create a warm, \
         personal book club atmosphere.\n\
         - Some messages in the conversation are \"Group Comments\" — messages between \
         club members that were NOT directed at you. You may see these for context, but \
         they are part of the natural club conversation. Don't be confused by them; \
         simply be aware of what members are discussing with each other.\n\
         - Keep responses conversational and around 2-3 paragraphs unless a longer \
         response is warranted.\n\
         - Be warm, engaging, and intellectually stimulating. Encourage discussion among \
         club members, not just Q&A with you.\n\
         - Feel free to ask members questions about their interpretations or what drew \
         them to the work.\n\
         \n\
         === AUTHOR PERSONA ===\n\
         {persona}\n\
         {guard}",
        club_name = overview.name,
    )
}

/// One sentence naming the club roster, or a generic line when no member
/// has a usable display name.
fn member_list_sentence(roster: &[String]) -> String {
    if roster.is_empty() {
        "The club members are readers discussing your book.".to_string()
    } else {
        format!(
            "The current members of this club are: {}.",
            roster.join(", ")
        )
    }
}

/// The author persona block: the book's stored template when present,
/// otherwise a default parameterized by author, title, and year.
pub fn persona_directive(overview: &ClubOverview) -> String {
    if let Some(ref template) = overview.persona_template {
        return template.clone();
    }

    format!(
        "You are {author}, the author of \"{title}\" ({year}).\n\
         Stay in character as {author}. Speak from your perspective as the author who \
         wrote this work.\n\
         Share insights about your creative process, the themes you explored, your \
         characters' motivations,\n\
         and the historical/cultural context of when you wrote the book.",
        author = overview.book_author,
        title = overview.book_title,
        year = overview.publication_year,
    )
}

/// The spoiler-guard block, or the empty string when no member has
/// recorded a reading position.
pub fn spoiler_guard(progress: &[MemberProgress]) -> String {
    if progress.is_empty() {
        return String::new();
    }

    let lines: Vec<String> = progress
        .iter()
        .map(|p| {
            let label = match p.label {
                Some(ref label) => format!(" ({label})"),
                None => String::new(),
            };
            format!("  - {}: {}% through the book{label}", p.name, p.position)
        })
        .collect();

    format!(
        "\n=== SPOILER GUARD (CRITICAL) ===\n\
         The following club members have shared how far they are in the book:\n\
         {}\n\
         \n\
         IMPORTANT RULES:\n\
         - NEVER discuss plot events, character developments, twists, or revelations \
         that happen BEYOND where a member has read.\n\
         - If a member asks about something later in the book, gently deflect: \"I don't \
         want to spoil anything — keep reading and we can discuss that when you get \
         there!\"\n\
         - If members are at different points, be careful to only discuss content that \
         ALL participating members have reached.\n\
         - You may discuss general themes and craft in a spoiler-free way regardless of \
         progress.\n\
         - If a member has not set their progress, assume they may not have finished and \
         err on the side of caution.\n",
        lines.join("\n"),
    )
}
