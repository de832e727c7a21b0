use super::*;
use std::process::{Command, Stdio};

fn spawn(script: &str) -> Process {
    let child = Command::new("sh")
        .args(["-c", script])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    Process::new(child).unwrap()
}

#[test]
fn wait_collects_both_streams() {
    let mut process = spawn("echo out; echo err >&2");
    assert!(process.wait().unwrap().success());
    assert!(!process.is_running());
    let mut logs = process.logs();
    logs.sort();
    assert_eq!(logs, ["err", "out"]);
}

#[test]
fn log_tail_is_bounded() {
    let mut process = spawn("i=0; while [ $i -lt 250 ]; do echo line$i; i=$((i+1)); done");
    process.wait().unwrap();
    let logs = process.logs();
    assert_eq!(logs.len(), LOG_TAIL);
    assert_eq!(logs.first().map(String::as_str), Some("line50"));
    assert_eq!(logs.last().map(String::as_str), Some("line249"));
}

#[test]
fn stop_kills_a_running_process() {
    let mut process = spawn("exec sleep 30");
    assert!(process.is_running());
    assert!(process.pid() > 0);
    process.stop().unwrap();
    assert!(!process.is_running());
}

#[test]
fn stop_after_exit_is_fine() {
    let mut process = spawn("exit 3");
    assert_eq!(process.wait().unwrap().code(), Some(3));
    process.stop().unwrap();
}

#[test]
fn stop_returns_when_a_grandchild_keeps_output_open() {
    let mut process = spawn("sleep 5 & exec sleep 30");
    let started = std::time::Instant::now();
    process.stop().unwrap();
    assert!(!process.is_running());
    assert!(started.elapsed() < DRAIN_TIMEOUT * 4, "{:?}", started.elapsed());
}
