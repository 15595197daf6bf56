//! Subprocess launch and output relay
//!
//! One background thread per invocation does the blocking read; every
//! sink mutation happens on the calling ("UI") thread, fed over a
//! single-producer mpsc channel. No pool, no cancellation, no timeout:
//! a hung runner blocks its background thread, never the drain loop's
//! ability to wait on the channel.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;

use crate::error::{ProveError, Result};
use crate::host::EditorHost;
use crate::invocation::{command_label, Invocation};

/// How runner output reaches the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Append decoded chunks as they arrive
    Streaming,
    /// Collect everything (stderr merged), write once
    Batch,
}

/// Launch the invocation from `working_dir` and relay its output.
pub fn execute(
    invocation: &Invocation,
    working_dir: &Path,
    host: &mut dyn EditorHost,
    policy: DeliveryPolicy,
) -> Result<()> {
    tracing::debug!(args = ?invocation.args, cwd = %working_dir.display(), "launching runner");

    match policy {
        DeliveryPolicy::Streaming => execute_streaming(invocation, working_dir, host),
        DeliveryPolicy::Batch => execute_batch(invocation, working_dir, host),
    }
}

fn spawn_runner(invocation: &Invocation, working_dir: &Path, capture_stderr: bool) -> Result<Child> {
    let (program, rest) = invocation
        .args
        .split_first()
        .ok_or_else(|| ProveError::Launch {
            message: "empty argument vector".to_string(),
        })?;

    let mut cmd = Command::new(program);
    cmd.args(rest);
    // Overlay merges over the inherited environment, it does not replace it
    cmd.envs(&invocation.env);
    cmd.current_dir(working_dir);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(if capture_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });

    cmd.spawn().map_err(|e| ProveError::Launch {
        message: format!("{}: {}", program, e),
    })
}

/// Streaming: sink first, then launch, then relay line chunks as the
/// background thread reads them off the stdout pipe.
fn execute_streaming(
    invocation: &Invocation,
    working_dir: &Path,
    host: &mut dyn EditorHost,
) -> Result<()> {
    host.create_output_sink();
    host.show_sink();
    host.append_to_sink(&format!(
        "{}\n{}\n",
        command_label(invocation),
        "-".repeat(80)
    ));

    let mut child = spawn_runner(invocation, working_dir, false)?;
    let stdout = child.stdout.take().ok_or_else(|| ProveError::Launch {
        message: "runner stdout was not captured".to_string(),
    })?;

    let (tx, rx) = mpsc::channel::<String>();
    let reader = thread::spawn(move || {
        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    if tx.send(String::from_utf8_lossy(&buf).into_owned()).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        let _ = child.wait();
    });

    // Drain until the producer hangs up (pipe closed, process reaped)
    for chunk in rx {
        host.append_to_sink(&chunk);
    }
    let _ = reader.join();

    Ok(())
}

/// Batch: the background thread reads both streams to completion, the
/// sink opens afterwards and receives the full text in one shot.
fn execute_batch(
    invocation: &Invocation,
    working_dir: &Path,
    host: &mut dyn EditorHost,
) -> Result<()> {
    let child = spawn_runner(invocation, working_dir, true)?;

    let (tx, rx) = mpsc::channel();
    let waiter = thread::spawn(move || {
        let _ = tx.send(child.wait_with_output());
    });

    let output = rx.recv().map_err(|_| ProveError::Launch {
        message: "runner thread terminated unexpectedly".to_string(),
    })??;
    let _ = waiter.join();

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    host.create_output_sink();
    host.show_sink();
    host.append_to_sink(&format!(
        "{}\n{}\n{}",
        command_label(invocation),
        "-".repeat(80),
        text
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Region, Selector};

    /// In-memory host capturing sink traffic
    struct TestHost {
        sink: String,
        appends: usize,
        shown: bool,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                sink: String::new(),
                appends: 0,
                shown: false,
            }
        }
    }

    impl EditorHost for TestHost {
        fn query_regions_by_selector(&self, _selector: Selector) -> Vec<Region> {
            Vec::new()
        }

        fn create_output_sink(&mut self) {
            self.sink.clear();
        }

        fn append_to_sink(&mut self, text: &str) {
            self.appends += 1;
            self.sink.push_str(text);
        }

        fn show_sink(&mut self) {
            self.shown = true;
        }
    }

    fn invocation(args: &[&str], env: &[(&str, &str)]) -> Invocation {
        Invocation {
            symbol: "My::App::Widget".to_string(),
            method: None,
            test_file: "t/My-App.t".to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            env: env
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn workdir() -> tempfile::TempDir {
        tempfile::TempDir::new().expect("Failed to create temp dir")
    }

    #[test]
    fn test_streaming_relays_output() {
        let dir = workdir();
        let mut host = TestHost::new();
        let inv = invocation(&["echo", "hello world"], &[]);

        execute(&inv, dir.path(), &mut host, DeliveryPolicy::Streaming).unwrap();

        assert!(host.shown);
        assert!(host.sink.starts_with("echo hello world\n"));
        assert!(host.sink.contains(&"-".repeat(80)));
        assert!(host.sink.contains("hello world\n"));
    }

    #[test]
    fn test_streaming_appends_per_line() {
        let dir = workdir();
        let mut host = TestHost::new();
        let inv = invocation(&["sh", "-c", "echo one; echo two"], &[]);

        execute(&inv, dir.path(), &mut host, DeliveryPolicy::Streaming).unwrap();

        // Label append plus one append per output line
        assert_eq!(host.appends, 3);
        assert!(host.sink.ends_with("one\ntwo\n"));
    }

    #[test]
    fn test_batch_writes_once_with_stderr_merged() {
        let dir = workdir();
        let mut host = TestHost::new();
        let inv = invocation(&["sh", "-c", "echo out; echo err 1>&2"], &[]);

        execute(&inv, dir.path(), &mut host, DeliveryPolicy::Batch).unwrap();

        assert!(host.shown);
        assert_eq!(host.appends, 1);
        assert!(host.sink.contains("out\n"));
        assert!(host.sink.contains("err\n"));
    }

    #[test]
    fn test_overlay_merges_over_base_environment() {
        let dir = workdir();
        let mut host = TestHost::new();
        // PATH comes from the base environment, TEST_METHOD from the overlay
        let inv = invocation(
            &["sh", "-c", "echo method=$TEST_METHOD path=$PATH"],
            &[("TEST_METHOD", "test_thing")],
        );

        execute(&inv, dir.path(), &mut host, DeliveryPolicy::Streaming).unwrap();

        assert!(host.sink.contains("method=test_thing"));
        assert!(host.sink.contains("path=/"));
    }

    #[test]
    fn test_unstartable_runner_is_a_launch_error() {
        let dir = workdir();
        let mut host = TestHost::new();
        let inv = invocation(&["prove-runner-no-such-binary"], &[]);

        let err = execute(&inv, dir.path(), &mut host, DeliveryPolicy::Streaming).unwrap_err();

        assert!(matches!(err, ProveError::Launch { .. }));
    }

    #[test]
    fn test_empty_argv_is_a_launch_error() {
        let dir = workdir();
        let mut host = TestHost::new();
        let inv = invocation(&[], &[]);

        let err = execute(&inv, dir.path(), &mut host, DeliveryPolicy::Batch).unwrap_err();

        assert!(matches!(err, ProveError::Launch { .. }));
    }
}
