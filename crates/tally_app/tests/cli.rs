//! Integration tests that run the review-tally binary

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

const SCENARIO: &str =
    "==+== Paper #1\nOverall merit:\nThis is a great paper with clear contributions.\n";

fn review_tally(cwd: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_review-tally"));
    command.current_dir(cwd);
    command
}

fn write_doc(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("reviews.txt");
    fs::write(&path, text).unwrap();
    path
}

fn run(command: &mut Command) -> (Output, String) {
    let output = command.output().expect("failed to run review-tally");
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    (output, stdout)
}

#[test]
fn report_prints_one_badge_per_paper() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, SCENARIO);

    let (output, stdout) = run(review_tally(dir.path())
        .args(["report", "--threshold", "5"])
        .arg(&doc));

    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout, "    1: ==+== Paper #1  [HC:8w OK]\n");
}

#[test]
fn report_summary_lists_deficits() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, SCENARIO);

    let (output, stdout) = run(review_tally(dir.path())
        .args(["report", "--summary", "--threshold", "10"])
        .arg(&doc));

    assert!(output.status.success(), "{output:?}");
    assert!(stdout.starts_with("SectionId | WordCount | Status\n"), "{stdout}");
    assert!(stdout.contains("UNDER by 2"), "{stdout}");
}

#[test]
fn report_json_carries_counts_and_status() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, SCENARIO);

    let (output, stdout) = run(review_tally(dir.path())
        .args(["report", "--json", "--threshold", "10"])
        .arg(&doc));

    assert!(output.status.success(), "{output:?}");
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value[0]["id"], "1");
    assert_eq!(value[0]["words"], 8);
    assert_eq!(value[0]["status"], "under");
    assert_eq!(value[0]["deficit"], 2);
}

#[test]
fn report_without_headers_says_so() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, "Overall merit:\nno header anywhere\n");

    let (output, stdout) = run(review_tally(dir.path()).arg("report").arg(&doc));

    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout, "no paper sections found\n");
}

#[test]
fn focus_reports_status_line_and_warning() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, SCENARIO);

    let (output, stdout) = run(review_tally(dir.path())
        .args(["focus", "--line", "3", "--threshold", "10"])
        .arg(&doc));

    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        stdout,
        "HC P#1: 8w (-2)\nWARNING: Paper #1 review is 2 words short of 10\n"
    );
}

#[test]
fn focus_on_passing_paper_is_blank() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, SCENARIO);

    let (output, stdout) = run(review_tally(dir.path())
        .args(["focus", "--line", "3", "--threshold", "5"])
        .arg(&doc));

    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout, "");
}

#[test]
fn config_file_in_working_directory_is_used() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("review_tally.ron"), "(word_threshold: 8)").unwrap();
    let doc = write_doc(&dir, SCENARIO);

    let (output, stdout) = run(review_tally(dir.path()).arg("report").arg(&doc));

    assert!(output.status.success(), "{output:?}");
    assert!(stdout.contains("[HC:8w OK]"), "{stdout}");
}

#[test]
fn missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, SCENARIO);

    let (output, _) = run(review_tally(dir.path())
        .args(["report", "--config", "nope.ron"])
        .arg(&doc));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nope.ron"), "{stderr}");
}

#[test]
fn config_command_prints_defaults() {
    let dir = TempDir::new().unwrap();

    let (output, stdout) = run(review_tally(dir.path()).arg("config"));

    assert!(output.status.success(), "{output:?}");
    assert!(stdout.contains("word_threshold: 500"), "{stdout}");
    assert!(stdout.contains("Builtin(PromptLine)"), "{stdout}");
}

/// Lines printed until `deadline`, or until `stop` matches one of them.
fn lines_until(
    rx: &mpsc::Receiver<String>,
    deadline: Instant,
    stop: impl Fn(&str) -> bool,
) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(wait) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(wait) {
            Ok(line) => {
                let done = stop(&line);
                lines.push(line);
                if done {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    lines
}

#[test]
fn watch_rerenders_once_after_a_burst_of_writes() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(&dir, SCENARIO);

    let mut child = review_tally(dir.path())
        .args(["watch", "--threshold", "5", "--debounce-ms", "300"])
        .arg(&doc)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start review-tally watch");
    let stdout = child.stdout.take().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(stdout).lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let first = lines_until(&rx, Instant::now() + Duration::from_secs(10), |line| {
        line.contains("[HC:")
    });

    for text in [
        "==+== Paper #1\nOverall merit:\nToo\n",
        "==+== Paper #1\nOverall merit:\nToo short\n",
        "==+== Paper #1\nOverall merit:\nToo short.\n",
    ] {
        fs::write(&doc, text).unwrap();
        thread::sleep(Duration::from_millis(30));
    }
    let after = lines_until(&rx, Instant::now() + Duration::from_secs(3), |_| false);

    let _ = child.kill();
    let _ = child.wait();

    assert_eq!(
        first.last().map(String::as_str),
        Some("    1: ==+== Paper #1  [HC:8w OK]"),
        "{first:?}"
    );
    let frames = after.iter().filter(|line| line.starts_with("-- ")).count();
    assert_eq!(frames, 1, "{after:?}");
    assert_eq!(
        after.last().map(String::as_str),
        Some("    1: ==+== Paper #1  [HC:2w WARN -3]"),
        "{after:?}"
    );
}
