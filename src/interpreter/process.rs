use super::{ExecutionError, InputProvider, Interpreter, InterpreterError, OutputSink, RunHooks};
use std::io::{BufRead, BufReader, Read, Write};
use std::process::{ChildStdin, Command, Stdio};
use std::thread;
use tracing::{debug, info, warn};

const BOOTSTRAP: &str = include_str!("bootstrap.py");
const READY_SENTINEL: &str = "__PYEXPLAIN_READY__";
const INPUT_MARKER: &str = "\0PYEXPLAIN_INPUT\0";
const ERROR_MARKER: &str = "\0PYEXPLAIN_ERROR\0";

/// Runs each submission in a fresh local Python child process.
///
/// The child merges stderr into stdout, so everything the program prints
/// arrives on one pipe in emission order. Control traffic (input requests and
/// the final traceback) travels on the same pipe as NUL-framed marker lines.
#[derive(Debug, Clone)]
pub struct PythonProcess {
    command: Vec<String>,
}

impl PythonProcess {
    pub fn new(command: Vec<String>) -> Result<Self, InterpreterError> {
        if command.is_empty() {
            return Err(InterpreterError::EmptyCommand);
        }
        Ok(Self { command })
    }

    /// Build from a shell-style command line such as `"python3 -I"`.
    pub fn from_command_line(line: &str) -> Result<Self, InterpreterError> {
        let parts =
            shlex::split(line).ok_or_else(|| InterpreterError::InvalidCommand(line.to_string()))?;
        Self::new(parts)
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }

    fn base_command(&self) -> Command {
        let mut cmd = Command::new(&self.command[0]);
        cmd.args(&self.command[1..])
            .env("PYTHONIOENCODING", "utf-8")
            .env("PYTHONUNBUFFERED", "1");
        cmd
    }
}

impl Interpreter for PythonProcess {
    fn initialize(&mut self) -> Result<(), InterpreterError> {
        let output = self
            .base_command()
            .arg("-c")
            .arg(format!("print('{}')", READY_SENTINEL))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| InterpreterError::Spawn {
                program: self.command[0].clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() || !stdout.contains(READY_SENTINEL) {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InterpreterError::NotReady(format!(
                "{} (exit: {})",
                stderr.trim(),
                output.status
            )));
        }

        info!(command = ?self.command, "python interpreter ready");
        Ok(())
    }

    fn execute(&mut self, source: &str, hooks: RunHooks<'_>) -> Result<(), ExecutionError> {
        let RunHooks { output, input } = hooks;

        let mut child = self
            .base_command()
            .arg("-u")
            .arg("-c")
            .arg(BOOTSTRAP)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ExecutionError::Infrastructure(format!("failed to start {}: {}", self.command[0], e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ExecutionError::Infrastructure("child has no stdin".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ExecutionError::Infrastructure("child has no stdout".into()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ExecutionError::Infrastructure("child has no stderr".into()))?;

        // Drain stderr on the side so a chatty interpreter cannot block stdout.
        let stderr_reader = thread::spawn(move || {
            let mut bytes = Vec::new();
            let _ = stderr.read_to_end(&mut bytes);
            String::from_utf8_lossy(&bytes).into_owned()
        });

        let relayed = send_line(&mut stdin, source)
            .and_then(|()| relay(BufReader::new(stdout), &mut stdin, output, input));
        drop(stdin);

        let traceback = match relayed {
            Ok(traceback) => traceback,
            Err(e) => {
                warn!("lost contact with python: {}", e);
                let _ = child.kill();
                let _ = child.wait();
                let _ = stderr_reader.join();
                return Err(e);
            }
        };

        let status = child.wait()?;
        let stderr_text = stderr_reader.join().unwrap_or_default();

        if let Some(text) = traceback {
            return Err(ExecutionError::Program(text));
        }
        if !status.success() {
            warn!(%status, "python exited without a report");
            return Err(ExecutionError::Infrastructure(format!(
                "interpreter exited with {}: {}",
                status,
                stderr_text.trim()
            )));
        }

        Ok(())
    }
}

/// Write `value` to the child as one JSON line.
fn send_line(stdin: &mut ChildStdin, value: &str) -> Result<(), ExecutionError> {
    let encoded =
        serde_json::to_string(value).map_err(|e| ExecutionError::Infrastructure(e.to_string()))?;
    stdin.write_all(encoded.as_bytes())?;
    stdin.write_all(b"\n")?;
    stdin.flush()?;
    Ok(())
}

/// Forward program output to `output` and answer input requests until the
/// child closes stdout. Returns the traceback if the program raised.
///
/// Lines are decoded lossily: a program writing raw bytes still succeeds.
fn relay<R: BufRead>(
    mut reader: R,
    stdin: &mut ChildStdin,
    output: &mut dyn OutputSink,
    input: &mut dyn InputProvider,
) -> Result<Option<String>, ExecutionError> {
    let mut traceback = None;
    let mut bytes = Vec::new();

    loop {
        bytes.clear();
        if reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(traceback);
        }
        let line = String::from_utf8_lossy(&bytes);

        if let Some(pos) = line.find(ERROR_MARKER) {
            if pos > 0 {
                output.write_chunk(&line[..pos]);
            }
            let payload = line[pos + ERROR_MARKER.len()..].trim_end();
            let text =
                serde_json::from_str::<String>(payload).unwrap_or_else(|_| payload.to_string());
            debug!("program raised");
            traceback = Some(text);
        } else if let Some(pos) = line.find(INPUT_MARKER) {
            if pos > 0 {
                output.write_chunk(&line[..pos]);
            }
            let payload = line[pos + INPUT_MARKER.len()..].trim_end();
            let prompt = serde_json::from_str::<String>(payload).unwrap_or_default();
            let prompt = (!prompt.is_empty()).then_some(prompt.as_str());

            let answer = input.read_input(prompt);
            if let Err(e) = send_line(stdin, &answer) {
                warn!("could not deliver input to program: {}", e);
            }
        } else {
            output.write_chunk(&line);
        }
    }
}
