//! Metadata and messages for outbound release events.

use std::collections::BTreeMap;

use crate::log_buffer::LogBuffer;

/// API group the event metadata keys are namespaced under.
pub const EVENT_META_GROUP: &str = "helm.toolkit.fluxcd.io";

pub const META_REVISION_KEY: &str = "revision";
pub const META_TOKEN_KEY: &str = "token";

/// Separates an event message from the action logs appended to it.
pub const LOG_HEADER: &str = "\n\nLast Helm logs:\n\n";

/// Event annotations, keyed `<group>/<key>`.
pub type EventMetadata = BTreeMap<String, String>;

/// `<group>/<key>`
pub fn event_meta_group_key(group: &str, key: &str) -> String {
    format!("{group}/{key}")
}

/// Event metadata for `revision` and `token` under the default group.
///
/// `None` when both are empty; otherwise only non-empty inputs get a key.
pub fn event_meta(revision: &str, token: &str) -> Option<EventMetadata> {
    event_meta_for_group(EVENT_META_GROUP, revision, token)
}

pub fn event_meta_for_group(group: &str, revision: &str, token: &str) -> Option<EventMetadata> {
    if revision.is_empty() && token.is_empty() {
        return None;
    }
    let mut metadata = EventMetadata::new();
    if !revision.is_empty() {
        metadata.insert(
            event_meta_group_key(group, META_REVISION_KEY),
            revision.to_string(),
        );
    }
    if !token.is_empty() {
        metadata.insert(
            event_meta_group_key(group, META_TOKEN_KEY),
            token.to_string(),
        );
    }
    Some(metadata)
}

/// Append the buffered action logs to an event message, if there are any.
pub fn event_message_with_log(message: &str, log: Option<&LogBuffer>) -> String {
    match log {
        Some(log) if !log.is_empty() => format!("{message}{LOG_HEADER}{log}"),
        _ => message.to_string(),
    }
}
