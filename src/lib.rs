#![allow(clippy::module_inception)]

use std::{fmt::Write, rc::Rc};

use crate::{
    compiler::compiler::generate,
    errors::errors::{CompileError, Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod toolchain;
pub mod type_checker;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Runs one compilation unit through every pass and returns the C++ source.
///
/// Each call builds its own environment and generator state, so separate
/// units never observe each other.
pub fn compile_source(source: &str, file_name: &str) -> Result<String, CompileError> {
    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;
    let mut program = parse(tokens, Rc::new(file_name.to_string()))?;
    let environment = type_check(&mut program)?;

    Ok(generate(&program, &environment)?)
}

/// Finds the line holding a byte offset.
///
/// Returns the 1-based line number, the line text and the offset within the
/// line. Offsets past the end (errors reported at EOF) land on the last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    if source.is_empty() {
        return None;
    }

    let pos = (position as usize).min(source.len() - 1);
    let mut start = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    None
}

/// Renders a diagnostic against the source it was produced from.
pub fn format_error(error: &Error, source: &str) -> String {
    /*
        Error: message
        -> main.toy
           |
        20 | let a = #;
           | --------^
    */

    let mut out = String::new();
    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", position.1);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use crate::errors::errors::{CompileError, ErrorImpl};

    const SOURCE: &str = "Hello, world!\nThis is a test file.\n\nTesting { }\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 44).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_past_end_uses_last_line() {
        let (line_number, _, _) = super::get_line_at_position(SOURCE, 500).unwrap();
        assert_eq!(line_number, 4);
        assert!(super::get_line_at_position("", 0).is_none());
    }

    #[test]
    fn test_format_error_points_at_offending_column() {
        let source = "let x = 5;\n    x = \"five\";\n";
        let error = match super::compile_source(source, "main.toy") {
            Err(CompileError::Diagnostic(error)) => error,
            other => panic!("expected a diagnostic, got {:?}", other),
        };
        assert!(matches!(error.kind(), ErrorImpl::InvalidTypeAssignment { .. }));

        let rendered = super::format_error(&error, source);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("Error: InvalidTypeAssignment ("));
        assert_eq!(lines[1], "-> main.toy");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "2 | x = \"five\";");
        assert_eq!(lines[4], "  | ^");
    }
}
