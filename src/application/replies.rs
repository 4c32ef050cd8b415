//! User-facing reply templates.
//!
//! All copy lives here so the orchestrator reads as control flow. One
//! response language; the transport renders plain markdown.

use crate::domain::foundation::TravelerId;
use crate::domain::trip::TripRequest;

/// Denial for an identity outside the allow-list.
pub fn access_denied(traveler: TravelerId) -> String {
    format!(
        "**Access denied**\n\n\
         This assistant is restricted to authorized travelers.\n\
         Your traveler id: `{}`\n\n\
         Contact the administrator to request access.",
        traveler
    )
}

/// Denial for an administrative command from an unauthorized identity.
pub fn command_not_authorized() -> String {
    "Command not authorized.".to_string()
}

/// Denial once the turn quota is exhausted.
pub fn quota_exhausted(ceiling: u32) -> String {
    format!(
        "**Message limit reached**\n\n\
         You have used all {} of your messages.\n\
         Contact the administrator to reset your counter.",
        ceiling
    )
}

/// Greeting for a freshly started session.
pub fn welcome(remaining: u32) -> String {
    format!(
        "Hello! I am your travel planning assistant.\n\n\
         Tell me about your trip in your own words. For example:\n\
         - \"I want to go to Paris from Madrid for 2 people\"\n\
         - \"I need a trip from the 15th to the 22nd of August with a budget of 800 per person\"\n\
         - Or just give me the details step by step\n\n\
         What trip are you planning?\n\n{}",
        quota_footer(remaining)
    )
}

/// Prompt for a free-text turn that arrived with no active session.
pub fn no_active_session() -> String {
    "Please use the start command to begin planning a trip.".to_string()
}

/// Rejection of an off-topic utterance, quoting the classifier's reason.
pub fn off_topic(reason: &str, remaining: u32) -> String {
    let mut text = String::from("**Topic not related to travel**\n\n");
    if !reason.is_empty() {
        text.push_str(reason);
        text.push_str("\n\n");
    }
    text.push_str(
        "I am a travel planning assistant. I can help you with destinations, \
         dates, passengers, and trip budgets.\n\n\
         What can I help you with for your next trip?\n\n",
    );
    text.push_str(&quota_footer(remaining));
    text
}

/// Appends validation warnings to an extraction reply.
pub fn with_warnings(reply: &str, warnings: &[String]) -> String {
    if warnings.is_empty() {
        return reply.to_string();
    }
    format!("{}\n\n**Note:** {}", reply, warnings.join("; "))
}

/// The remaining-turn footer appended to quota-charged replies.
pub fn quota_footer(remaining: u32) -> String {
    format!("**Messages remaining:** {}", remaining)
}

/// Deterministic reply used when the extraction collaborator is unavailable.
pub fn fallback_reply(missing: &[&str]) -> String {
    if missing.is_empty() {
        "Perfect! I have all the information I need.".to_string()
    } else {
        format!("I still need you to provide: {}", missing.join(", "))
    }
}

fn shown<T: std::fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "missing".to_string())
}

/// Summary block for a completed record.
pub fn trip_summary(request: &TripRequest) -> String {
    format!(
        "**Your trip summary:**\n\n\
         - **Passengers:** {}\n\
         - **Origin:** {}\n\
         - **Destination:** {}\n\
         - **Departure:** {}\n\
         - **Return:** {}\n\
         - **Budget per person:** {} EUR\n\n\
         All the information is complete!",
        shown(&request.passengers),
        shown(&request.origin),
        shown(&request.destination),
        shown(&request.departure_date),
        shown(&request.return_date),
        shown(&request.budget_per_person),
    )
}

/// Wrapper around the generated recommendations, closing the session.
pub fn completion(recommendations: &str) -> String {
    format!(
        "**Recommendations for your trip:**\n\n{}\n\n\
         Enjoy your trip! If you need help with another trip, use the start command.",
        recommendations
    )
}

/// Status report, with or without an active session.
pub fn status_report(request: Option<&TripRequest>, used: u32, ceiling: u32) -> String {
    let usage = format!(
        "**Message usage:**\n\
         - Messages used: {}/{}\n\
         - Messages remaining: {}",
        used,
        ceiling,
        ceiling.saturating_sub(used)
    );

    match request {
        None => format!(
            "**Traveler status:**\n\n\
             No trip in progress. Use the start command to begin.\n\n{}",
            usage
        ),
        Some(request) => {
            let missing = request.missing_fields();
            let progress = if missing.is_empty() {
                "**Information complete!**".to_string()
            } else {
                format!("**Still to complete:** {}", missing.join(", "))
            };

            format!(
                "**Current trip status:**\n\n\
                 - **Passengers:** {}\n\
                 - **Origin:** {}\n\
                 - **Destination:** {}\n\
                 - **Departure:** {}\n\
                 - **Return:** {}\n\
                 - **Budget:** {} EUR\n\n\
                 {}\n\n{}",
                shown(&request.passengers),
                shown(&request.origin),
                shown(&request.destination),
                shown(&request.departure_date),
                shown(&request.return_date),
                shown(&request.budget_per_person),
                progress,
                usage
            )
        }
    }
}

/// Confirmation of a cancelled trip.
pub fn cancelled() -> String {
    "Trip cancelled. Use the start command to begin a new one.".to_string()
}

/// Cancel requested with nothing in progress.
pub fn nothing_to_cancel() -> String {
    "You have no trip in progress.".to_string()
}

/// Confirmation of an administrative quota reset.
pub fn quota_reset(ceiling: u32) -> String {
    format!(
        "**Counter reset**\n\n\
         Your message counter has been reset.\n\
         You now have {} messages available.",
        ceiling
    )
}

/// Administrative overview of users, quota usage, and active sessions.
pub fn admin_overview(users: &[(TravelerId, u32)], ceiling: u32, active_sessions: usize) -> String {
    let mut text = format!(
        "**System information:**\n\n**Authorized travelers:** {}\n",
        users.len()
    );
    for (traveler, used) in users {
        text.push_str(&format!(
            "- Id `{}`: {}/{} messages ({} remaining)\n",
            traveler,
            used,
            ceiling,
            ceiling.saturating_sub(*used)
        ));
    }
    text.push_str(&format!(
        "\n**Configuration:**\n\
         - Limit per traveler: {} messages\n\
         - Active travelers: {} with trips in progress",
        ceiling, active_sessions
    ));
    text
}

/// Usage hint for a quick-tips command with no destination.
pub fn tips_usage(remaining: u32) -> String {
    format!(
        "**Usage:** quick tips need a destination.\n\n\
         **Example:** tips for Paris\n\n{}",
        quota_footer(remaining)
    )
}

/// Quick tips for a destination.
pub fn tips(destination: &str, content: &str, remaining: u32) -> String {
    format!(
        "**Quick tips for {}:**\n\n{}\n\n{}\n\n\
         Want to plan a full trip? Use the start command.",
        destination,
        content,
        quota_footer(remaining)
    )
}

/// Quick tips could not be generated.
pub fn tips_failed(destination: &str, remaining: u32) -> String {
    format!(
        "I could not generate tips for {}. Please try again.\n\n{}",
        destination,
        quota_footer(remaining)
    )
}

/// Command reference.
pub fn help(ceiling: u32) -> String {
    format!(
        "**Available commands:**\n\n\
         - start - Begin planning a new trip\n\
         - status - See your trip progress and message usage\n\
         - cancel - Cancel the trip in progress\n\
         - tips [destination] - Quick tips for a destination\n\
         - help - Show this help\n\n\
         **Administrative commands:**\n\
         - reset - Reset your message counter\n\
         - overview - System and traveler information\n\n\
         **Hints:**\n\
         - You can write naturally: \"I want to go to Paris from Madrid\"\n\
         - Use YYYY-MM-DD dates: \"from 2026-08-15 to 2026-08-22\"\n\
         - Mention budgets: \"800 per person\"\n\
         - Give everything at once or step by step\n\n\
         **Limits:**\n\
         - At most {} messages per traveler\n\
         - Access restricted to authorized travelers\n\
         - Travel-related topics only",
        ceiling
    )
}
