mod protocol;
mod server;

pub use protocol::{read_message, write_message, Message, MessageContent};
pub use server::PlaygroundServer;

use crate::interpreter::Interpreter;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// Serve framed requests from `input` until disconnect or end of stream.
pub fn serve<I, R, W>(interpreter: I, input: &mut R, output: W) -> io::Result<()>
where
    I: Interpreter,
    R: BufRead,
    W: Write,
{
    info!("playground server starting");
    let mut server = PlaygroundServer::new(interpreter, output);
    let mut msg_count = 0u64;

    loop {
        match read_message(input) {
            Ok(Some(msg)) => {
                msg_count += 1;
                if !server.handle(msg)? {
                    break;
                }
            }
            Ok(None) => {
                info!("input closed");
                break;
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("dropping malformed message: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    info!(messages = msg_count, "playground server exiting");
    Ok(())
}

/// Serve on the process's stdin/stdout.
pub fn run_server_mode<I: Interpreter>(interpreter: I) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    serve(interpreter, &mut input, io::stdout())
}
