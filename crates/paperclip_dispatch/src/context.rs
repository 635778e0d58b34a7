//! Per-submission context assembly and provider ordering.

use crate::PreferenceMatch;
use paperclip_core::{ChatTurn, ConversationHistory, PromptContext, Provider, Role};

/// System instruction, the last `window` history messages, then the prompt.
///
/// Timestamps and provider tags are dropped; only role and text travel.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use paperclip_core::{ConversationHistory, Role};
/// use paperclip_dispatch::build_context;
///
/// let mut history = ConversationHistory::new();
/// history.append_exchange("hi", "hello", "p1", Utc::now());
///
/// let context = build_context("be terse", &history, 30, "next");
/// let roles: Vec<Role> = context.turns().iter().map(|t| t.role).collect();
/// assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant, Role::User]);
/// assert_eq!(context.prompt(), "next");
/// ```
pub fn build_context(
    system_prompt: &str,
    history: &ConversationHistory,
    window: usize,
    prompt: &str,
) -> PromptContext {
    let recent = history.recent(window);
    let mut turns = Vec::with_capacity(recent.len() + 2);
    turns.push(ChatTurn::new(Role::System, system_prompt));
    turns.extend(
        recent
            .into_iter()
            .map(|m| ChatTurn::new(*m.role(), m.text().clone())),
    );
    turns.push(ChatTurn::new(Role::User, prompt));
    PromptContext::new(turns, prompt)
}

/// Enabled providers, preferred ones first, each group keeping input order.
///
/// Input order is expected to be ascending priority already.
///
/// # Examples
///
/// ```
/// use paperclip_core::{Provider, ProviderType};
/// use paperclip_dispatch::{PreferenceMatch, order_providers};
///
/// let providers = vec![
///     Provider::builder().id("or").kind(ProviderType::OpenRouter).build().unwrap(),
///     Provider::builder().id("gem").kind(ProviderType::Gemini).build().unwrap(),
/// ];
/// let ordered = order_providers(&providers, Some("gemini"), PreferenceMatch::TypeOrId);
/// let ids: Vec<&str> = ordered.iter().map(|p| p.id().as_str()).collect();
/// assert_eq!(ids, vec!["gem", "or"]);
/// ```
pub fn order_providers<'a>(
    providers: &'a [Provider],
    preferred: Option<&str>,
    matching: PreferenceMatch,
) -> Vec<&'a Provider> {
    let enabled = providers.iter().filter(|p| *p.enabled());
    let Some(preferred) = preferred.filter(|p| !p.trim().is_empty()) else {
        return enabled.collect();
    };
    let (mut first, rest): (Vec<&Provider>, Vec<&Provider>) =
        enabled.partition(|p| p.matches_preference(preferred, matching.matches_id()));
    first.extend(rest);
    first
}
