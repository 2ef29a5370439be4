use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{self, BufRead, Write};

/// Largest body `read_message` will allocate for.
pub const MAX_CONTENT_LENGTH: usize = 16 * 1024 * 1024;

/// One framed protocol message.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub seq: u64,
    #[serde(rename = "type")]
    pub msg_type: String,
    #[serde(flatten)]
    pub content: MessageContent,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    // Tried in order; responses carry `command` too, so they must come first.
    Response {
        request_seq: u64,
        success: bool,
        command: String,
        message: Option<String>,
        body: Option<Value>,
    },
    Request {
        command: String,
        arguments: Option<Value>,
    },
    Event {
        event: String,
        body: Option<Value>,
    },
}

/// Write `msg` as `Content-Length: N\r\n\r\n{json}`.
pub fn write_message<W: Write>(out: &mut W, msg: &Message) -> io::Result<()> {
    let json = serde_json::to_string(msg).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    write!(out, "Content-Length: {}\r\n\r\n{}", json.len(), json)?;
    out.flush()
}

/// Read one framed message. `Ok(None)` means the stream ended.
pub fn read_message<R: BufRead>(reader: &mut R) -> io::Result<Option<Message>> {
    let mut content_length = 0usize;
    let mut saw_header = false;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            if saw_header {
                break;
            }
            continue;
        }
        saw_header = true;
        if let Some(value) = line.strip_prefix("Content-Length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    if content_length == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "missing Content-Length header",
        ));
    }
    if content_length > MAX_CONTENT_LENGTH {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Content-Length {} exceeds limit", content_length),
        ));
    }

    let mut buffer = vec![0u8; content_length];
    reader.read_exact(&mut buffer)?;
    serde_json::from_slice(&buffer)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn framing_survives_a_write_read_cycle() {
        let msg = Message {
            seq: 7,
            msg_type: "request".into(),
            content: MessageContent::Request {
                command: "explain".into(),
                arguments: Some(json!({ "source": "x = 1\n" })),
            },
        };
        let mut bytes = Vec::new();
        write_message(&mut bytes, &msg).unwrap();
        assert!(bytes.starts_with(b"Content-Length: "));

        let back = read_message(&mut Cursor::new(bytes)).unwrap().unwrap();
        assert_eq!(back.seq, 7);
        match back.content {
            MessageContent::Request { command, arguments } => {
                assert_eq!(command, "explain");
                assert_eq!(arguments.unwrap()["source"], "x = 1\n");
            }
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn end_of_stream_is_none() {
        assert!(read_message(&mut Cursor::new(Vec::new())).unwrap().is_none());
    }

    #[test]
    fn garbage_body_is_invalid_data() {
        let raw = b"Content-Length: 3\r\n\r\n{{{".to_vec();
        let err = read_message(&mut Cursor::new(raw)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn oversized_length_is_invalid_data() {
        let raw = b"Content-Length: 18446744073709551615\r\n\r\n{}".to_vec();
        let err = read_message(&mut Cursor::new(raw)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let raw = format!("Content-Length: {}\r\n\r\n{{}}", MAX_CONTENT_LENGTH + 1);
        let err = read_message(&mut Cursor::new(raw.into_bytes())).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
