//! Smoke test for the stdin command loop (§6, External Interfaces) over
//! the actual built binary: feed it a scripted session and check the
//! handshake and a `bestmove` line come back on stdout.

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

fn run_session(commands: &[&str]) -> Vec<String> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_hugo_uct"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary spawns");

    let mut stdin = child.stdin.take().expect("stdin is piped");
    for line in commands {
        writeln!(stdin, "{line}").expect("write to child stdin");
    }
    drop(stdin);

    let stdout = child.stdout.take().expect("stdout is piped");
    let lines: Vec<String> = BufReader::new(stdout)
        .lines()
        .map(|l| l.expect("child stdout is valid utf8"))
        .collect();

    let status = child.wait().expect("child exits");
    assert!(status.success(), "engine process exited with {status}");
    lines
}

#[test]
fn uci_handshake_reports_engine_identity_and_readiness() {
    let lines = run_session(&["uci", "isready", "quit"]);
    assert!(lines.iter().any(|l| l.starts_with("id name")));
    assert!(lines.iter().any(|l| l == "uciok"));
    assert!(lines.iter().any(|l| l == "readyok"));
}

#[test]
fn go_from_the_startpos_reports_a_bestmove() {
    let lines = run_session(&["position startpos", "go movetime 50", "quit"]);
    let bestmove = lines.iter().find(|l| l.starts_with("bestmove"));
    assert!(bestmove.is_some(), "no bestmove line in output: {lines:?}");
    let text = bestmove.unwrap();
    assert_ne!(text, "bestmove 0000", "startpos always has legal moves");
}

#[test]
fn go_from_a_forced_mate_position_reports_the_mating_move() {
    let lines = run_session(&[
        "position fen 6k1/5ppp/8/8/8/8/5PPP/R5K1 w - -",
        "go movetime 400",
        "quit",
    ]);
    let bestmove = lines.iter().find(|l| l.starts_with("bestmove"));
    assert_eq!(bestmove.map(String::as_str), Some("bestmove a1a8"));
}

#[test]
fn position_with_moves_then_a_quick_go_does_not_hang() {
    let lines = run_session(&[
        "position startpos moves e2e4 c7c5 g1f3",
        "go movetime 20",
        "quit",
    ]);
    assert!(lines.iter().any(|l| l.starts_with("bestmove")));
}
