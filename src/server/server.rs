use super::protocol::{write_message, Message, MessageContent};
use crate::config::DEFAULT_EXAMPLE;
use crate::executor::{ExecutionCoordinator, Status};
use crate::explain::{classify, explain_source};
use crate::interpreter::{Interpreter, ScriptedInput};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::{self, Write};
use std::sync::mpsc::{channel, Receiver};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct ClassifyArgs {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ExplainArgs {
    source: String,
}

#[derive(Debug, Deserialize)]
struct RunArgs {
    source: String,
    #[serde(default)]
    stdin: Vec<String>,
}

/// Headless front end: answers explain/run requests over a framed stream.
pub struct PlaygroundServer<I, W> {
    seq: u64,
    coordinator: ExecutionCoordinator<I>,
    status_events: Receiver<Status>,
    out: W,
}

impl<I: Interpreter, W: Write> PlaygroundServer<I, W> {
    pub fn new(interpreter: I, out: W) -> Self {
        let (tx, rx) = channel();
        Self {
            seq: 0,
            coordinator: ExecutionCoordinator::new(interpreter).with_status_listener(tx),
            status_events: rx,
            out,
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn send_message(&mut self, content: MessageContent, msg_type: &str) -> io::Result<()> {
        let msg = Message {
            seq: self.next_seq(),
            msg_type: msg_type.to_string(),
            content,
        };
        write_message(&mut self.out, &msg)?;
        debug!(seq = msg.seq, msg_type, "sent message");
        Ok(())
    }

    pub fn send_response(
        &mut self,
        request_seq: u64,
        command: String,
        success: bool,
        message: Option<String>,
        body: Option<Value>,
    ) -> io::Result<()> {
        self.send_message(
            MessageContent::Response {
                request_seq,
                success,
                command,
                message,
                body,
            },
            "response",
        )
    }

    pub fn send_event(&mut self, event: &str, body: Option<Value>) -> io::Result<()> {
        self.send_message(
            MessageContent::Event {
                event: event.to_string(),
                body,
            },
            "event",
        )
    }

    /// Forward status changes queued by the coordinator.
    fn flush_status_events(&mut self) -> io::Result<()> {
        let pending: Vec<Status> = self.status_events.try_iter().collect();
        for status in pending {
            self.send_event(
                "status",
                Some(json!({ "status": status, "message": status.message() })),
            )?;
        }
        Ok(())
    }

    /// Handle one incoming message. Returns `false` once the client disconnects.
    pub fn handle(&mut self, msg: Message) -> io::Result<bool> {
        let (command, arguments) = match msg.content {
            MessageContent::Request { command, arguments } => (command, arguments),
            _ => {
                debug!("ignoring non-request message");
                return Ok(true);
            }
        };
        debug!(seq = msg.seq, %command, "request");

        match command.as_str() {
            "initialize" => self.handle_initialize(msg.seq, command)?,
            "classifyLine" => self.handle_classify_line(msg.seq, command, arguments)?,
            "explain" => self.handle_explain(msg.seq, command, arguments)?,
            "run" => self.handle_run(msg.seq, command, arguments)?,
            "analyzeAndRun" => self.handle_analyze_and_run(msg.seq, command, arguments)?,
            "reset" => {
                let body = json!({ "source": DEFAULT_EXAMPLE });
                self.send_response(msg.seq, command, true, None, Some(body))?
            }
            "disconnect" => {
                self.send_response(msg.seq, command, true, None, None)?;
                return Ok(false);
            }
            _ => {
                warn!("unhandled command: {}", command);
                let message = format!("unknown command `{}`", command);
                self.send_response(msg.seq, command, false, Some(message), None)?;
            }
        }
        Ok(true)
    }

    fn bad_arguments(
        &mut self,
        seq: u64,
        command: String,
        err: serde_json::Error,
    ) -> io::Result<()> {
        warn!(%command, "bad arguments: {}", err);
        let message = format!("invalid arguments: {}", err);
        self.send_response(seq, command, false, Some(message), None)
    }

    fn handle_initialize(&mut self, seq: u64, command: String) -> io::Result<()> {
        let ready = self.coordinator.initialize();
        self.flush_status_events()?;
        let status = self.coordinator.status();
        let body = json!({
            "ready": ready,
            "status": status,
            "message": status.message(),
            "error": self.coordinator.boot_error(),
        });
        self.send_response(seq, command, true, None, Some(body))
    }

    fn handle_classify_line(
        &mut self,
        seq: u64,
        command: String,
        args: Option<Value>,
    ) -> io::Result<()> {
        let args: ClassifyArgs = match serde_json::from_value(args.unwrap_or(Value::Null)) {
            Ok(a) => a,
            Err(e) => return self.bad_arguments(seq, command, e),
        };
        let kind = classify(&args.text);
        let body = json!({ "kind": kind, "explanation": kind.explanation() });
        self.send_response(seq, command, true, None, Some(body))
    }

    fn handle_explain(&mut self, seq: u64, command: String, args: Option<Value>) -> io::Result<()> {
        let args: ExplainArgs = match serde_json::from_value(args.unwrap_or(Value::Null)) {
            Ok(a) => a,
            Err(e) => return self.bad_arguments(seq, command, e),
        };
        let records = explain_source(&args.source);
        self.send_response(seq, command, true, None, Some(json!({ "records": records })))
    }

    fn handle_run(&mut self, seq: u64, command: String, args: Option<Value>) -> io::Result<()> {
        let args: RunArgs = match serde_json::from_value(args.unwrap_or(Value::Null)) {
            Ok(a) => a,
            Err(e) => return self.bad_arguments(seq, command, e),
        };
        let mut input = ScriptedInput::new(args.stdin);
        let result = self.coordinator.run(&args.source, &mut input);
        self.flush_status_events()?;
        self.send_response(seq, command, true, None, Some(json!(result)))
    }

    fn handle_analyze_and_run(
        &mut self,
        seq: u64,
        command: String,
        args: Option<Value>,
    ) -> io::Result<()> {
        let args: RunArgs = match serde_json::from_value(args.unwrap_or(Value::Null)) {
            Ok(a) => a,
            Err(e) => return self.bad_arguments(seq, command, e),
        };
        let records = explain_source(&args.source);
        let mut input = ScriptedInput::new(args.stdin);
        let result = self.coordinator.run(&args.source, &mut input);
        self.flush_status_events()?;
        self.send_response(
            seq,
            command,
            true,
            None,
            Some(json!({ "records": records, "result": result })),
        )
    }
}
