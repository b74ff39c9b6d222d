// src/text/snippet.rs

//! Code template post-processing.
//!
//! Skeletons arrive with auxiliary type definitions (list nodes, tree nodes)
//! supplied as a commented block above the solution stub:
//!
//! ```text
//! # Definition for a binary tree node.
//! # class TreeNode:
//! #     def __init__(self, val=0, left=None, right=None):
//! #         self.val = val
//! ```
//!
//! `unmask_definitions` strips the comment markers inside that block so the
//! definitions become live code. The "Definition for ..." line itself is
//! documentation and stays a comment; every comment outside a definition
//! block is left untouched.

use std::sync::OnceLock;

use regex::Regex;

fn definition_header() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^#\s*Definition\s+(?:for|of)\b").expect("valid header pattern")
    })
}

fn class_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^# class\b").expect("valid class pattern"))
}

/// Un-comment definition blocks in a code skeleton.
///
/// A two-state line scanner: outside a block, lines pass through unchanged
/// and a "Definition for/of ..." comment arms the block; inside, class lines
/// and indented continuations lose their marker plus exactly one space,
/// content-free comments become blank lines, other comments pass through,
/// and the first non-comment line disarms the block.
pub fn unmask_definitions(code: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut in_definition = false;

    for line in code.lines() {
        if !in_definition {
            if definition_header().is_match(line) {
                in_definition = true;
            }
            result.push(line.to_string());
            continue;
        }

        if !line.starts_with('#') {
            // First line of real code ends the block.
            in_definition = false;
            result.push(line.to_string());
            continue;
        }

        if line.chars().skip(1).all(|c| c == ' ') {
            // Comment with no content separates definition lines.
            result.push(String::new());
        } else if class_line().is_match(line) || line[1..].starts_with("    ") {
            // Marker and exactly one space go; the remaining indent stays.
            result.push(line[2..].to_string());
        } else {
            result.push(line.to_string());
        }
    }

    let mut out = result.join("\n");
    if code.ends_with('\n') {
        out.push('\n');
    }
    out
}
