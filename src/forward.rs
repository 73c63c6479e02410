use crate::task_api::TaskRequest;
use crate::types::SlackEvent;

/// An event is forwarded when the bot is mentioned in a channel, or when a
/// human (not another bot) sends it a direct message.
pub fn qualifies(event: &SlackEvent) -> bool {
    if event.event_type == "app_mention" {
        return true;
    }
    event.is_direct_message() && event.event_type == "message" && !event.is_from_bot()
}

/// Maps a qualifying event onto the task API body. A top-level channel
/// message falls back to its own `ts` as the thread id; direct messages
/// never carry a thread id downstream.
pub fn build_task_request(event: &SlackEvent) -> TaskRequest {
    let thread_id = if event.is_direct_message() {
        String::new()
    } else {
        event
            .thread_ts
            .clone()
            .filter(|ts| !ts.is_empty())
            .or_else(|| event.ts.clone())
            .unwrap_or_default()
    };

    TaskRequest {
        thread_id,
        channel_id: event.channel.clone().unwrap_or_default(),
        user_id: event.user.clone().unwrap_or_default(),
        query: event.text.clone().unwrap_or_default(),
    }
}
