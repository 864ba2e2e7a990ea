use chat_insight::export::serialize_generic;
use chat_insight::models::Platform;
use chat_insight::parser::ChatParser;

#[test]
fn test_format_detection_per_platform() {
    let parser = ChatParser::new();

    let whatsapp = "12/31/2023, 10:30 PM - Alice: hello\n12/31/2023, 10:31 PM - Bob: hi";
    assert_eq!(parser.detect_format(whatsapp), Platform::Whatsapp);

    let telegram = "31.12.2023 22:30:00 - Alice: hello\n31.12.2023 22:31:00 - Bob: hi";
    assert_eq!(parser.detect_format(telegram), Platform::Telegram);

    let discord = "Alice — 31/12/2023 22:30\nhello\nBob — 31/12/2023 22:31\nhi";
    assert_eq!(parser.detect_format(discord), Platform::Discord);

    let imessage = "Dec 31, 2023 10:30:45 PM\nFrom: Alice\nhello";
    assert_eq!(parser.detect_format(imessage), Platform::Imessage);

    let generic = "Alice: hello\nBob: hi";
    assert_eq!(parser.detect_format(generic), Platform::Generic);
}

#[test]
fn test_detection_total_on_noise() {
    let parser = ChatParser::new();
    // Pure prose: nothing matches any grammar, still a valid outcome
    let noise = "just some words\nwithout any structure\nat all";
    let outcome = parser.parse(noise, None);
    assert_eq!(outcome.format, Platform::Generic);
    assert!(outcome.messages.is_empty());
    assert!(!outcome.diagnostics.is_empty());
}

#[test]
fn test_whatsapp_timestamps_and_messages() {
    let parser = ChatParser::new();
    let raw = "12/31/2023, 10:30 PM - Alice: I'm feeling great today!\n\
               12/31/2023, 10:31 PM - Bob: Awesome!";
    let outcome = parser.parse(raw, None);
    assert_eq!(outcome.format, Platform::Whatsapp);
    assert_eq!(outcome.messages.len(), 2);
    assert_eq!(outcome.messages[0].sender, "Alice");
    assert_eq!(outcome.messages[1].sender, "Bob");
    let first = outcome.messages[0].timestamp.expect("timestamp");
    assert_eq!(first.format("%Y-%m-%d %H:%M").to_string(), "2023-12-31 22:30");
}

#[test]
fn test_messages_within_period_bounds() {
    let parser = ChatParser::new();
    let raw = "12/30/2023, 09:00 AM - Alice: start\n\
               12/31/2023, 10:00 AM - Bob: middle\n\
               12/31/2023, 11:00 PM - Alice: end";
    let outcome = parser.parse(raw, None);
    let stamps: Vec<_> = outcome
        .messages
        .iter()
        .filter_map(|m| m.timestamp)
        .collect();
    let start = *stamps.iter().min().unwrap();
    let end = *stamps.iter().max().unwrap();
    for ts in &stamps {
        assert!(*ts >= start && *ts <= end);
    }
}

#[test]
fn test_multiline_continuation_merging() {
    let parser = ChatParser::new();
    let raw = "12/31/2023, 10:30 PM - Alice: first line\n\
               and a continuation\n\
               12/31/2023, 10:31 PM - Bob: reply";
    let outcome = parser.parse(raw, None);
    assert_eq!(outcome.messages.len(), 2);
    assert_eq!(outcome.messages[0].text, "first line\nand a continuation");
}

#[test]
fn test_media_markers_flagged_case_insensitively() {
    let parser = ChatParser::new();
    let raw = "12/31/2023, 10:30 PM - Alice: <MEDIA OMITTED>\n\
               12/31/2023, 10:31 PM - Bob: photo.jpg (file attached)";
    let outcome = parser.parse(raw, None);
    assert!(outcome.messages[0].is_media);
    assert!(outcome.messages[1].is_media);
}

#[test]
fn test_generic_round_trip() {
    let parser = ChatParser::new();
    let raw = "Alice: hello there\nBob: hi back\nAlice: how have you been";
    let first = parser.parse(raw, None);
    assert_eq!(first.format, Platform::Generic);

    let serialized = serialize_generic(&first.messages);
    let second = parser.parse(&serialized, Some(Platform::Generic));
    assert_eq!(first.messages, second.messages);
}

#[test]
fn test_telegram_json_export() {
    let parser = ChatParser::new();
    let raw = r#"{
        "name": "chat",
        "messages": [
            {"from": "Alice", "date": "2023-12-31T22:30:00", "text": "hello"},
            {"from": "Bob", "date": "2023-12-31T22:31:00", "text": "hi"}
        ]
    }"#;
    let outcome = parser.parse(raw, None);
    assert_eq!(outcome.format, Platform::Telegram);
    assert_eq!(outcome.messages.len(), 2);
    assert!(outcome.messages.iter().all(|m| m.timestamp.is_some()));
}

#[test]
fn test_hint_skips_detection() {
    let parser = ChatParser::new();
    let raw = "Alice: hello\nBob: hi";
    let outcome = parser.parse(raw, Some(Platform::Whatsapp));
    // Honoured hint: the lines do not fit the WhatsApp grammar, so they end
    // up as orphan diagnostics rather than messages
    assert_eq!(outcome.format, Platform::Whatsapp);
    assert!(outcome.messages.is_empty());
    assert_eq!(outcome.diagnostics.len(), 2);
}
