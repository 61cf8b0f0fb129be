use mio_signals::{send_signal, Signal};
use std::collections::BTreeSet;
use std::io::{BufRead, BufReader, Read};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::process::{Child, ChildStdout, Command, Stdio};

/// Kills the child on drop so a failed assertion doesn't leave it running.
struct ChildGuard {
    inner: Child,
}

impl Deref for ChildGuard {
    type Target = Child;

    fn deref(&self) -> &Child {
        &self.inner
    }
}

impl DerefMut for ChildGuard {
    fn deref_mut(&mut self) -> &mut Child {
        &mut self.inner
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.inner.kill();
        let _ = self.inner.wait();
    }
}

/// Cargo builds examples next to the `deps` directory holding this test.
fn example_path(name: &str) -> PathBuf {
    let mut path = std::env::current_exe().expect("no test executable path");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.join("examples").join(name)
}

fn spawn_demo() -> ChildGuard {
    Command::new(example_path("signal_handling"))
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .stdout(Stdio::piped())
        .spawn()
        .map(|inner| ChildGuard { inner })
        .expect("unable to run signal_handling demo")
}

#[test]
fn test_demo_reports_every_signal() {
    let mut child = spawn_demo();
    let pid = child.id();
    let mut stdout = BufReader::new(child.stdout.take().expect("no stdout"));

    // The first line is printed once the signals are being handled.
    let mut first = String::new();
    stdout.read_line(&mut first).unwrap();
    assert_eq!(
        first,
        format!("Call `kill -s TERM {}` to stop the process\n", pid)
    );

    for signal in [
        Signal::User1,
        Signal::User2,
        Signal::Interrupt,
        Signal::Quit,
        Signal::Terminate,
    ] {
        send_signal(pid, signal).unwrap();
    }

    let status = child.wait().expect("error running demo");
    assert!(status.success(), "demo exited with {}", status);

    let rest = read_rest(stdout);
    let lines: Vec<&str> = rest.lines().collect();
    assert_eq!(lines.len(), 5, "unexpected output: {:?}", lines);

    // Delivery order differs between platforms, but TERM was sent last and
    // ends the demo.
    assert_eq!(lines[4], "Got terminate signal");
    let got: BTreeSet<&str> = lines[..4].iter().copied().collect();
    let want: BTreeSet<&str> = [
        "Got interrupt signal",
        "Got quit signal",
        "Got user signal 1",
        "Got user signal 2",
    ]
    .into_iter()
    .collect();
    assert_eq!(got, want);
}

fn read_rest(mut stdout: BufReader<ChildStdout>) -> String {
    let mut output = String::new();
    stdout
        .read_to_string(&mut output)
        .expect("error reading demo output");
    output
}
