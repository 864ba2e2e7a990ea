//! Serialisation of canonical message sequences.
//!
//! Parsed messages can be written back out as txt, csv, or json, and the
//! Generic wire form round-trips through the parser: parsing the output of
//! [`serialize_generic`] reproduces the same canonical sequence.

use csv::Writer;
use std::fs::File;
use std::io::{BufWriter, Write as IoWrite};
use std::path::Path;

use crate::error::Result;
use crate::models::{Message, OutputFormat};

/// Render messages in the Generic wire format: `Name: text`, with
/// multi-line bodies continuing on the following lines.
#[must_use]
pub fn serialize_generic(messages: &[Message]) -> String {
    let mut out = String::new();
    for message in messages {
        let mut lines = message.text.lines();
        let first = lines.next().unwrap_or("");
        out.push_str(&message.sender);
        out.push_str(": ");
        out.push_str(first);
        out.push('\n');
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Write messages to a file in the specified format.
pub fn write_messages_to_file(
    messages: &[Message],
    format: OutputFormat,
    file_path: &Path,
) -> Result<()> {
    match format {
        OutputFormat::Txt => write_txt_file(messages, file_path),
        OutputFormat::Csv => write_csv_file(messages, file_path),
        OutputFormat::Json => write_json_file(messages, file_path),
    }
}

fn format_timestamp(message: &Message) -> String {
    message
        .timestamp
        .map_or_else(|| "-".to_string(), |ts| ts.format("%b %d, %Y %r").to_string())
}

/// Format: `sender, timestamp, text` with a blank line between messages.
fn write_txt_file(messages: &[Message], file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);

    for message in messages {
        writeln!(
            writer,
            "{}, {}, {}",
            message.sender,
            format_timestamp(message),
            message.text
        )?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Includes header row: `ID, Sender, Datetime, Message, Platform`
fn write_csv_file(messages: &[Message], file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(["ID", "Sender", "Datetime", "Message", "Platform"])?;

    for (i, message) in messages.iter().enumerate() {
        writer.write_record(&[
            (i + 1).to_string(),
            message.sender.clone(),
            format_timestamp(message),
            message.text.clone(),
            message.platform.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Outputs a JSON array of canonical message objects.
fn write_json_file(messages: &[Message], file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, messages)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;

    fn generic(sender: &str, text: &str) -> Message {
        Message {
            timestamp: None,
            sender: sender.to_string(),
            text: text.to_string(),
            platform: Platform::Generic,
            is_media: false,
        }
    }

    #[test]
    fn test_serialize_generic_single_lines() {
        let messages = vec![generic("Alice", "hello"), generic("Bob", "hi back")];
        let out = serialize_generic(&messages);
        assert_eq!(out, "Alice: hello\nBob: hi back\n");
    }

    #[test]
    fn test_serialize_generic_multiline_body() {
        let messages = vec![generic("Alice", "first\nsecond")];
        let out = serialize_generic(&messages);
        assert_eq!(out, "Alice: first\nsecond\n");
    }
}
