use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const REQUEST_ID_HEADER: &str = "x-fleetdash-request-id";

const ERROR_BODY_PREVIEW_CHARS: usize = 512;

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn new_request_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let count = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("fleetdash-{millis}-{count}")
}

/// Trims an error body so failure logs stay one line of bounded size.
pub(crate) fn error_body_preview(raw: &str) -> String {
    let flattened = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= ERROR_BODY_PREVIEW_CHARS {
        return flattened;
    }
    let mut preview: String = flattened.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
