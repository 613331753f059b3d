//! Memory log append and transcript rendering.

use scrivano_core::MemoryLog;

#[test]
fn test_fresh_log_is_empty() {
    let log = MemoryLog::new();
    assert!(log.is_empty());
    assert_eq!(log.len(), 0);
    assert_eq!(log.history(), "");
}

#[test]
fn test_append_records_in_order() {
    let mut log = MemoryLog::new();
    log.append("first prompt", "first response");
    log.append("second prompt", "second response");

    assert_eq!(log.len(), 2);
    assert_eq!(log.entries()[0].prompt(), "first prompt");
    assert_eq!(log.entries()[1].response(), "second response");
}

#[test]
fn test_history_interleaves_human_and_ai_lines() {
    let mut log = MemoryLog::new();
    log.append("Write me a title about volcanoes", "Fire Mountains Explained");
    log.append("Write a script for Fire Mountains Explained", "SCRIPT TEXT");

    assert_eq!(
        log.history(),
        "Human: Write me a title about volcanoes\n\
         AI: Fire Mountains Explained\n\
         Human: Write a script for Fire Mountains Explained\n\
         AI: SCRIPT TEXT"
    );
}

#[test]
fn test_transcripts_serialize_for_reporting() {
    let mut log = MemoryLog::new();
    log.append("prompt", "response");

    let json = serde_json::to_string(&log).expect("serializable");
    assert!(json.contains("\"prompt\":\"prompt\""));
    assert!(json.contains("\"response\":\"response\""));

    let back: MemoryLog = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(back, log);
}
