use std::{
    io::{BufRead, BufReader, Read},
    process::{Command as OsCommand, ExitStatus, Stdio},
    sync::mpsc::{self, Sender},
};

use tracing::{debug, error};

use super::{Command, CommandError, CommandRunner};

/// Runs commands as child processes of the current process, capturing their output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn capture(&self, command: &Command) -> Result<(String, ExitStatus), CommandError> {
        if command.executable().is_empty() {
            return Err(CommandError::EmptyExecutable);
        }

        debug!(%command, "spawning process");
        let mut process = OsCommand::new(command.executable())
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = process
            .stdout
            .take()
            .ok_or(CommandError::StreamPipeError("stdout".to_string()))?;

        let stderr = process
            .stderr
            .take()
            .ok_or(CommandError::StreamPipeError("stderr".to_string()))?;

        let (snd, rcv) = mpsc::channel();

        // Read stdout and send to the channel
        std::thread::spawn({
            let snd = snd.clone();
            let command = command.to_string();
            move || {
                process_events(stdout, snd)
                    .map_err(|e| error!(%command, "stdout stream error: {}", e))
            }
        });

        // Read stderr and send to the channel
        std::thread::spawn({
            let command = command.to_string();
            move || {
                process_events(stderr, snd)
                    .map_err(|e| error!(%command, "stderr stream error: {}", e))
            }
        });

        // Both senders are dropped once the streams reach EOF
        let output = rcv.iter().collect::<Vec<_>>().join("\n");

        let status = process.wait()?;
        Ok((output, status))
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &Command) -> (String, Result<(), CommandError>) {
        match self.capture(command) {
            Ok((output, status)) if status.success() => (output, Ok(())),
            Ok((output, status)) => (output, Err(CommandError::from(status))),
            Err(e) => (String::new(), Err(e)),
        }
    }
}

/// Sends every line of `stream` until EOF.
///
/// Lines are split on raw bytes and decoded lossily, so output that is not valid UTF-8
/// never stops the stream from being drained.
fn process_events<R>(stream: R, snd: Sender<String>) -> Result<(), CommandError>
where
    R: Read,
{
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        snd.send(decode_line(&buf))?;
    }
}

fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
