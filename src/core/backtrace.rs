//! Stack frames, backtrace capture and project-root scrubbing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;
use std::borrow::Cow;

/// Replacement for the project root in scrubbed file paths
pub const PROJECT_ROOT_TOKEN: &str = "[PROJECT_ROOT]";

/// One entry of a stack trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub file: String,
    pub number: u32,
    pub method: String,
}

impl Frame {
    pub fn new(file: impl Into<String>, number: u32, method: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            number,
            method: method.into(),
        }
    }
}

/// Replace a leading `root` in every frame's file with [`PROJECT_ROOT_TOKEN`].
///
/// The root is matched as a literal prefix. An empty root leaves the stack
/// untouched and borrowed.
pub fn scrub<'a>(stack: &'a [Frame], root: &str) -> Cow<'a, [Frame]> {
    if root.is_empty() {
        return Cow::Borrowed(stack);
    }

    let frames = stack
        .iter()
        .map(|frame| match frame.file.strip_prefix(root) {
            Some(rest) => Frame {
                file: format!("{}{}", PROJECT_ROOT_TOKEN, rest),
                number: frame.number,
                method: frame.method.clone(),
            },
            None => frame.clone(),
        })
        .collect();

    Cow::Owned(frames)
}

//   0: my_crate::handler::run
//              at ./src/handler.rs:42:9
static FUNCTION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+:\s+(?P<method>.+?)\s*$").unwrap());
static LOCATION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*at\s+(?P<file>.+?):(?P<line>\d+)(?::\d+)?\s*$").unwrap()
});

/// Capture the calling thread's stack as frames.
///
/// Frames belonging to the backtrace machinery itself are skipped.
pub fn capture() -> Vec<Frame> {
    let rendered = Backtrace::force_capture().to_string();
    parse_backtrace(&rendered)
        .into_iter()
        .filter(|frame| !is_internal(&frame.method))
        .collect()
}

fn is_internal(method: &str) -> bool {
    method.starts_with("std::backtrace")
        || method.starts_with("honeybadger::core::backtrace::capture")
        || method.starts_with("honeybadger::core::notice::Error::from_error")
}

/// Parse the textual form of a [`Backtrace`] into frames.
///
/// A function line without a following `at` line yields a frame with an
/// empty file and line 0.
pub fn parse_backtrace(rendered: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();
    let mut pending_location = false;

    for line in rendered.lines() {
        if let Some(caps) = LOCATION_LINE.captures(line) {
            if pending_location {
                if let Some(frame) = frames.last_mut() {
                    frame.file = caps["file"].to_string();
                    frame.number = caps["line"].parse().unwrap_or(0);
                }
                pending_location = false;
            }
            continue;
        }

        if let Some(caps) = FUNCTION_LINE.captures(line) {
            frames.push(Frame::new("", 0, &caps["method"]));
            pending_location = true;
        }
    }

    frames
}
