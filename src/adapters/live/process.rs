//! Live process runner using `std::process::Command`.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{SvnError, SvnResult};
use crate::ports::process::{Invocation, ProcessOutput, ProcessRunner};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long to wait for the reader threads once the process group is killed.
const KILL_GRACE: Duration = Duration::from_millis(500);

/// Live runner that spawns real child processes.
///
/// On Unix the child leads its own process group, so a timeout also takes
/// down anything it forked (an `ssh` tunnel, say) and the pipes close.
pub struct LiveProcessRunner;

impl ProcessRunner for LiveProcessRunner {
    fn run(&self, invocation: &Invocation) -> SvnResult<ProcessOutput> {
        let program = invocation.program.as_str();
        let mut command = Command::new(program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        let mut child = command.spawn().map_err(|e| SvnError::from_spawn(program, e))?;

        // Drain both pipes concurrently so a chatty child cannot block on a full pipe.
        let (tx, rx) = mpsc::channel();
        if let Some(pipe) = child.stdout.take() {
            drain(pipe, Stream::Stdout, tx.clone());
        }
        if let Some(pipe) = child.stderr.take() {
            drain(pipe, Stream::Stderr, tx.clone());
        }
        drop(tx);

        let deadline = invocation.timeout.map(|timeout| Instant::now() + timeout);
        let timed_out = |child: &mut Child, timeout: Duration| {
            tracing::warn!(pid = child.id(), "killing process group after {timeout:?}");
            kill_group(child);
            // Descendants are gone, so the readers finish promptly.
            let _ = collect(&rx, Some(Instant::now() + KILL_GRACE));
            SvnError::TimedOut { command: invocation.display(), timeout }
        };

        let status = match wait_until(&mut child, deadline) {
            Ok(status) => status,
            Err(WaitError::Io(source)) => {
                kill_group(&mut child);
                return Err(SvnError::Spawn { program: program.to_string(), source });
            }
            Err(WaitError::Expired) => {
                return Err(timed_out(&mut child, invocation.timeout.unwrap_or_default()));
            }
        };

        // The child is gone, but a descendant may still hold the pipes open.
        match collect(&rx, deadline) {
            Ok((stdout, stderr)) => Ok(ProcessOutput { exit_code: status.code(), stdout, stderr }),
            Err(_) => Err(timed_out(&mut child, invocation.timeout.unwrap_or_default())),
        }
    }
}

enum WaitError {
    Io(std::io::Error),
    Expired,
}

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

fn wait_until(child: &mut Child, deadline: Option<Instant>) -> Result<ExitStatus, WaitError> {
    let Some(deadline) = deadline else {
        return child.wait().map_err(WaitError::Io);
    };
    loop {
        if let Some(status) = child.try_wait().map_err(WaitError::Io)? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            return Err(WaitError::Expired);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Kill the child's process group, then the child itself, and reap it.
fn kill_group(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        // The group outlives its leader while any descendant is still in it.
        if let Ok(pid) = i32::try_from(child.id()) {
            let _ = killpg(Pid::from_raw(pid), Signal::SIGKILL);
        }
    }
    // The child may already have exited; either way reap it.
    let _ = child.kill();
    let _ = child.wait();
}

fn drain<R: Read + Send + 'static>(mut pipe: R, stream: Stream, tx: Sender<(Stream, String)>) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send((stream, String::from_utf8_lossy(&buf).into_owned()));
    });
}

/// Gather both streams. Every reader owns a sender, so the channel
/// disconnects once all of them are done.
fn collect(
    rx: &Receiver<(Stream, String)>,
    deadline: Option<Instant>,
) -> Result<(String, String), WaitError> {
    let (mut stdout, mut stderr) = (String::new(), String::new());
    loop {
        let received = match deadline {
            Some(deadline) => {
                match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                    Ok(received) => received,
                    Err(RecvTimeoutError::Timeout) => return Err(WaitError::Expired),
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match rx.recv() {
                Ok(received) => received,
                Err(_) => break,
            },
        };
        match received {
            (Stream::Stdout, text) => stdout = text,
            (Stream::Stderr, text) => stderr = text,
        }
    }
    Ok((stdout, stderr))
}
