//! Multi-section IDL bundle splitting.
//!
//! A ROS 2 IDL definition may carry several IDL files concatenated with `====`
//! separator lines, each optionally headed by an `IDL: <path>` line:
//!
//! ```text
//! ================================================================================
//! IDL: geometry_msgs/msg/Point
//! module geometry_msgs { module msg { struct Point { double x; }; }; };
//! ================================================================================
//! IDL: std_msgs/msg/Header
//! module std_msgs { module msg { struct Header { string frame_id; }; }; };
//! ```
//!
//! [`SchemaBundle::parse`] splits such text into [`IdlSection`]s, each parsed as
//! an independent document.

use crate::lex::is_separator_line;

/// One IDL document extracted from a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdlSection {
    /// Path from the `IDL: pkg/msg/Type` header, if the section has one.
    pub idl_path: Option<String>,
    /// The document text after the header, up to the next separator.
    pub body: String,
}

/// The sections of a single IDL text, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaBundle {
    pub sections: Vec<IdlSection>,
}

impl SchemaBundle {
    /// Split `text` at separator lines. Sections without any content are dropped.
    pub fn parse(text: &str) -> Self {
        let mut sections = Vec::new();
        let mut buf: Vec<&str> = Vec::new();

        for line in text.lines() {
            if is_separator_line(line) {
                sections.extend(build_section(&buf));
                buf.clear();
                continue;
            }
            buf.push(line);
        }
        sections.extend(build_section(&buf));

        Self { sections }
    }
}

fn build_section(lines: &[&str]) -> Option<IdlSection> {
    let start = lines.iter().position(|l| !l.trim().is_empty())?;
    let first = lines[start].trim();

    let (idl_path, body_lines) = match first.strip_prefix("IDL:") {
        Some(path) => (Some(path.trim().to_string()), &lines[start + 1..]),
        None => (None, &lines[start..]),
    };
    let body = body_lines.join("\n");
    if idl_path.is_none() && body.trim().is_empty() {
        return None;
    }
    Some(IdlSection { idl_path, body })
}
