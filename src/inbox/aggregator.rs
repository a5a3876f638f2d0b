//! Conversation aggregator
//!
//! Turns the flat, arbitrarily ordered message log visible to one viewer
//! into per-counterpart conversation summaries plus the ordered thread for
//! each conversation. Pure function of its inputs: same messages, same
//! profiles, same viewer always produce the same output, including order.

use crate::entities::{Message, Profile};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// One entry of the conversation list.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSummary {
    pub conversation_id: String,
    /// The participant who is not the viewer.
    pub counterpart: Profile,
    /// Newest message of the conversation, ties broken by message id.
    pub last_message: Message,
    /// Messages addressed to the viewer and not yet read. Never counts
    /// messages the viewer sent.
    pub unread_count: usize,
}

/// Aggregation output: summaries ordered by recency, plus the full thread
/// per conversation id for rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InboxView {
    pub conversations: Vec<ConversationSummary>,
    pub messages_by_conversation: HashMap<String, Vec<Message>>,
}

/// Group `messages` into conversations from the point of view of
/// `viewer_id`.
///
/// Defensive rules, applied in order:
/// - `viewer_id` absent or blank: empty view, not an error (the shell may
///   ask before authentication resolves);
/// - records with blank key fields are dropped;
/// - a conversation containing any message where the viewer is neither
///   sender nor receiver is excluded wholesale (no standing to see it);
/// - a conversation whose counterpart profile is missing from `profiles`
///   is omitted entirely, thread included;
/// - a conversation with more than one distinct counterpart id is a data
///   inconsistency: the counterpart of the newest message wins and the
///   anomaly is logged.
pub fn aggregate(
    messages: &[Message],
    profiles: &HashMap<String, Profile>,
    viewer_id: Option<&str>,
) -> InboxView {
    let Some(viewer) = viewer_id.filter(|id| !id.trim().is_empty()) else {
        return InboxView::default();
    };

    // Stage 1: partition by conversation id.
    let mut partitions: HashMap<&str, Vec<&Message>> = HashMap::new();
    for message in messages {
        if !message.is_well_formed() {
            continue;
        }
        partitions
            .entry(message.conversation_id.as_str())
            .or_default()
            .push(message);
    }

    // Stage 2: reduce each partition independently.
    let mut conversations = Vec::with_capacity(partitions.len());
    let mut messages_by_conversation = HashMap::with_capacity(partitions.len());

    for (conversation_id, mut thread) in partitions {
        // One foreign message taints the whole conversation: the viewer
        // has no standing to see any of it.
        if !thread.iter().all(|m| m.involves(viewer)) {
            warn!(
                conversation_id,
                "conversation contains messages not involving the viewer, excluding it"
            );
            continue;
        }

        thread.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.message_id.cmp(&b.message_id))
        });

        let Some(counterpart_id) = resolve_counterpart_id(conversation_id, &thread, viewer) else {
            continue;
        };
        let Some(counterpart) = profiles.get(counterpart_id) else {
            continue;
        };

        let last_message = match thread.last() {
            Some(last) => (*last).clone(),
            None => continue,
        };
        let unread_count = thread
            .iter()
            .filter(|m| m.receiver_id == viewer && !m.is_read)
            .count();

        conversations.push(ConversationSummary {
            conversation_id: conversation_id.to_string(),
            counterpart: counterpart.clone(),
            last_message,
            unread_count,
        });
        messages_by_conversation.insert(
            conversation_id.to_string(),
            thread.into_iter().cloned().collect(),
        );
    }

    conversations.sort_by(|a, b| {
        b.last_message
            .created_at
            .cmp(&a.last_message.created_at)
            .then_with(|| b.last_message.message_id.cmp(&a.last_message.message_id))
    });

    InboxView {
        conversations,
        messages_by_conversation,
    }
}

/// The unique non-viewer id of a thread already sorted oldest-first.
/// Threads where the viewer talks only to themselves have no counterpart.
fn resolve_counterpart_id<'a>(
    conversation_id: &str,
    thread: &[&'a Message],
    viewer: &str,
) -> Option<&'a str> {
    let distinct: HashSet<&str> = thread
        .iter()
        .map(|m| {
            if m.is_from(viewer) {
                m.receiver_id.as_str()
            } else {
                m.sender_id.as_str()
            }
        })
        .filter(|id| *id != viewer)
        .collect();

    if distinct.len() > 1 {
        warn!(
            conversation_id,
            counterparts = distinct.len(),
            "conversation has mixed counterpart identities, keeping the most recent"
        );
    }

    // Newest-first scan so that inconsistent groups resolve to the
    // counterpart seen on the most recent message.
    thread.iter().rev().find_map(|m| {
        let other = if m.is_from(viewer) {
            m.receiver_id.as_str()
        } else {
            m.sender_id.as_str()
        };
        (other != viewer).then_some(other)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RoleKind;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    fn message(
        id: &str,
        conversation: &str,
        from: &str,
        to: &str,
        seconds: i64,
        read: bool,
    ) -> Message {
        Message {
            message_id: id.to_string(),
            conversation_id: conversation.to_string(),
            sender_id: from.to_string(),
            receiver_id: to.to_string(),
            content: format!("message {id}"),
            created_at: at(seconds),
            is_read: read,
            related_opportunity_id: None,
        }
    }

    fn profile(id: &str) -> Profile {
        Profile {
            profile_id: id.to_string(),
            full_name: Some(format!("name of {id}")),
            avatar_url: None,
            company_name: None,
            role: RoleKind::Applicant,
        }
    }

    fn profiles(ids: &[&str]) -> HashMap<String, Profile> {
        ids.iter().map(|id| (id.to_string(), profile(id))).collect()
    }

    #[test]
    fn two_party_thread() {
        let messages = vec![
            message("1", "A", "u1", "u2", 10, true),
            message("2", "A", "u2", "u1", 20, false),
        ];
        let view = aggregate(&messages, &profiles(&["u1", "u2"]), Some("u1"));

        assert_eq!(view.conversations.len(), 1);
        let conv = &view.conversations[0];
        assert_eq!(conv.conversation_id, "A");
        assert_eq!(conv.counterpart.profile_id, "u2");
        assert_eq!(conv.last_message.message_id, "2");
        assert_eq!(conv.unread_count, 1);
        assert_eq!(view.messages_by_conversation["A"].len(), 2);
    }

    #[test]
    fn no_viewer_yields_empty_view() {
        let messages = vec![message("1", "A", "u1", "u2", 10, false)];
        let lookup = profiles(&["u1", "u2"]);

        let view = aggregate(&messages, &lookup, None);
        assert!(view.conversations.is_empty());
        assert!(view.messages_by_conversation.is_empty());

        let view = aggregate(&messages, &lookup, Some("  "));
        assert!(view.conversations.is_empty());
    }

    #[test]
    fn aggregation_is_deterministic() {
        let messages = vec![
            message("3", "B", "u3", "u1", 15, false),
            message("1", "A", "u1", "u2", 10, true),
            message("2", "A", "u2", "u1", 20, false),
            message("4", "C", "u1", "u4", 5, true),
        ];
        let lookup = profiles(&["u1", "u2", "u3", "u4"]);

        let first = aggregate(&messages, &lookup, Some("u1"));
        let second = aggregate(&messages, &lookup, Some("u1"));
        assert_eq!(first, second);
    }

    #[test]
    fn conversations_sorted_by_recency_descending() {
        let messages = vec![
            message("1", "A", "u2", "u1", 5, true),
            message("2", "B", "u3", "u1", 30, true),
            message("3", "C", "u4", "u1", 15, true),
        ];
        let view = aggregate(&messages, &profiles(&["u1", "u2", "u3", "u4"]), Some("u1"));

        let order: Vec<&str> = view
            .conversations
            .iter()
            .map(|c| c.conversation_id.as_str())
            .collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn equal_timestamps_break_ties_by_message_id() {
        let messages = vec![
            message("1", "A", "u1", "u2", 10, true),
            message("3", "A", "u2", "u1", 10, false),
            message("2", "A", "u1", "u2", 10, true),
        ];
        let view = aggregate(&messages, &profiles(&["u1", "u2"]), Some("u1"));

        assert_eq!(view.conversations[0].last_message.message_id, "3");
        let thread_ids: Vec<&str> = view.messages_by_conversation["A"]
            .iter()
            .map(|m| m.message_id.as_str())
            .collect();
        assert_eq!(thread_ids, vec!["1", "2", "3"]);

        // Conversation list tie-break: two conversations whose last
        // messages share a timestamp order by last message id descending.
        let messages = vec![
            message("5", "A", "u2", "u1", 10, true),
            message("6", "B", "u3", "u1", 10, true),
        ];
        let view = aggregate(&messages, &profiles(&["u1", "u2", "u3"]), Some("u1"));
        let order: Vec<&str> = view
            .conversations
            .iter()
            .map(|c| c.conversation_id.as_str())
            .collect();
        assert_eq!(order, vec!["B", "A"]);
    }

    #[test]
    fn unresolved_profile_omits_the_whole_conversation() {
        let messages = vec![
            message("1", "A", "u1", "u2", 10, false),
            message("2", "B", "u1", "u3", 20, false),
        ];
        // u3 never resolved
        let view = aggregate(&messages, &profiles(&["u1", "u2"]), Some("u1"));

        assert_eq!(view.conversations.len(), 1);
        assert_eq!(view.conversations[0].conversation_id, "A");
        assert!(!view.messages_by_conversation.contains_key("B"));
    }

    #[test]
    fn foreign_messages_are_excluded() {
        let messages = vec![
            message("1", "A", "u2", "u3", 10, false),
            message("2", "B", "u2", "u1", 20, false),
        ];
        let view = aggregate(&messages, &profiles(&["u1", "u2", "u3"]), Some("u1"));

        assert_eq!(view.conversations.len(), 1);
        assert_eq!(view.conversations[0].conversation_id, "B");
    }

    #[test]
    fn foreign_message_inside_viewer_conversation_excludes_it_entirely() {
        // One conversation id carrying a message between two other users:
        // the viewer has no standing to see the group, so the whole
        // conversation disappears, their own message included.
        let messages = vec![
            message("1", "A", "u2", "u1", 10, false),
            message("2", "A", "u2", "u3", 20, false),
            message("3", "B", "u2", "u1", 30, false),
        ];
        let view = aggregate(&messages, &profiles(&["u1", "u2", "u3"]), Some("u1"));

        assert_eq!(view.conversations.len(), 1);
        assert_eq!(view.conversations[0].conversation_id, "B");
        assert!(!view.messages_by_conversation.contains_key("A"));
    }

    #[test]
    fn every_visible_message_lands_in_exactly_one_thread() {
        let messages = vec![
            message("1", "A", "u1", "u2", 10, true),
            message("2", "A", "u2", "u1", 20, false),
            message("3", "B", "u3", "u1", 15, false),
            message("4", "C", "u5", "u6", 5, false), // not the viewer's
        ];
        let view = aggregate(&messages, &profiles(&["u1", "u2", "u3"]), Some("u1"));

        let mut seen: Vec<&str> = view
            .messages_by_conversation
            .values()
            .flatten()
            .map(|m| m.message_id.as_str())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec!["1", "2", "3"]);
    }

    #[test]
    fn unread_never_counts_own_or_read_messages() {
        let messages = vec![
            message("1", "A", "u1", "u2", 10, false), // sent by viewer, unread on u2's side
            message("2", "A", "u2", "u1", 20, true),
            message("3", "A", "u2", "u1", 30, false),
            message("4", "A", "u2", "u1", 40, false),
        ];
        let view = aggregate(&messages, &profiles(&["u1", "u2"]), Some("u1"));

        let conv = &view.conversations[0];
        assert_eq!(conv.unread_count, 2);
        let addressed_to_viewer = view.messages_by_conversation["A"]
            .iter()
            .filter(|m| m.receiver_id == "u1")
            .count();
        assert!(conv.unread_count <= addressed_to_viewer);
    }

    #[test]
    fn mixed_counterpart_group_keeps_most_recent_identity() {
        // Data inconsistency: one conversation id carrying two distinct
        // counterparts. The newest message names u3, so u3 wins.
        let messages = vec![
            message("1", "A", "u2", "u1", 10, false),
            message("2", "A", "u3", "u1", 20, false),
        ];
        let view = aggregate(&messages, &profiles(&["u1", "u2", "u3"]), Some("u1"));

        assert_eq!(view.conversations.len(), 1);
        assert_eq!(view.conversations[0].counterpart.profile_id, "u3");
        // Both messages still belong to the thread.
        assert_eq!(view.messages_by_conversation["A"].len(), 2);
    }

    #[test]
    fn malformed_records_are_dropped_silently() {
        let blank_conversation = message("1", "  ", "u2", "u1", 10, false);
        let blank_sender = message("2", "A", "", "u1", 20, false);
        let messages = vec![
            blank_conversation,
            blank_sender,
            message("3", "A", "u2", "u1", 30, false),
        ];
        let view = aggregate(&messages, &profiles(&["u1", "u2"]), Some("u1"));

        assert_eq!(view.messages_by_conversation["A"].len(), 1);
        assert_eq!(view.conversations[0].last_message.message_id, "3");
    }

    #[test]
    fn self_only_thread_has_no_counterpart_and_is_skipped() {
        let messages = vec![message("1", "A", "u1", "u1", 10, false)];
        let view = aggregate(&messages, &profiles(&["u1"]), Some("u1"));

        assert!(view.conversations.is_empty());
        assert!(view.messages_by_conversation.is_empty());
    }

    #[test]
    fn empty_input_is_fine() {
        let view = aggregate(&[], &HashMap::new(), Some("u1"));
        assert_eq!(view, InboxView::default());
    }
}
