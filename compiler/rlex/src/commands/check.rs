//! The `check` command: report lexical errors and encoding problems.
//!
//! Files are tokenized in parallel, one tokenizer per file; reports are
//! printed in argument order.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rlex_core::{tokenize, EncodingIssue, EncodingIssueKind, Position, SourceBuffer, Token};
use tracing::debug;

use super::CommandError;
use crate::{SourceError, SourceFile};

/// One problem found in a file.
///
/// Displays as `path:row:column: message` with 1-based row and column, the
/// convention editors and terminals link on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    pub path: PathBuf,
    /// Byte offset of the problem; problems are reported in offset order.
    pub offset: u32,
    /// 0-based position, as carried by tokens.
    pub position: Position,
    pub message: String,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.path.display(),
            self.position.row + 1,
            self.position.column + 1,
            self.message
        )
    }
}

/// Check every file in `paths` and write one line per problem.
///
/// Returns `true` when no file had problems. An unreadable file aborts the
/// whole check.
pub fn check_files(paths: &[PathBuf], out: &mut impl Write) -> Result<bool, CommandError> {
    let results: Vec<Result<Vec<Problem>, SourceError>> =
        paths.par_iter().map(|path| check_file(path)).collect();

    let mut clean = true;
    for result in results {
        let problems = result?;
        for problem in &problems {
            writeln!(out, "{problem}")?;
        }
        clean &= problems.is_empty();
    }
    out.flush()?;
    debug!(files = paths.len(), clean, "check finished");
    Ok(clean)
}

fn check_file(path: &Path) -> Result<Vec<Problem>, SourceError> {
    let file = SourceFile::open(path)?;
    Ok(problems_in(path, &file.buffer()))
}

/// Encoding issues and error tokens of one buffer, in source order.
fn problems_in(path: &Path, buffer: &SourceBuffer) -> Vec<Problem> {
    let mut problems = encoding_problems(path, buffer);
    let reports_nulls = buffer
        .encoding_issues()
        .iter()
        .any(|issue| issue.kind == EncodingIssueKind::InteriorNull);

    for token in tokenize(buffer) {
        if !token.is_error() {
            continue;
        }
        // Null bytes are already reported as encoding issues.
        if reports_nulls && token.bytes() == [0] {
            continue;
        }
        problems.push(Problem {
            path: path.to_path_buf(),
            offset: token.begin(),
            position: token.position(),
            message: describe_error(&token),
        });
    }

    problems.sort_by_key(|problem| problem.offset);
    problems
}

/// One problem per encoding issue, except that all null-byte runs are
/// folded into a single problem at the first one.
///
/// Positions come from one cursor walked forward through the issues in
/// offset order, so the cost is linear in the source length.
fn encoding_problems(path: &Path, buffer: &SourceBuffer) -> Vec<Problem> {
    let mut issues: Vec<&EncodingIssue> = buffer.encoding_issues().iter().collect();
    issues.sort_by_key(|issue| issue.pos);

    let null_bytes: u64 = issues
        .iter()
        .filter(|issue| issue.kind == EncodingIssueKind::InteriorNull)
        .map(|issue| u64::from(issue.len))
        .sum();

    let mut cursor = buffer.cursor();
    let mut nulls_reported = false;
    let mut problems = Vec::new();
    for issue in issues {
        let message = match issue.kind {
            EncodingIssueKind::InteriorNull if nulls_reported => continue,
            EncodingIssueKind::InteriorNull => {
                nulls_reported = true;
                null_message(null_bytes)
            }
            kind => kind.message().to_owned(),
        };
        cursor.advance_n(issue.pos.saturating_sub(cursor.offset()));
        problems.push(Problem {
            path: path.to_path_buf(),
            offset: issue.pos,
            position: cursor.position(),
            message,
        });
    }
    problems
}

fn null_message(count: u64) -> String {
    let first = EncodingIssueKind::InteriorNull.message();
    if count > 1 {
        format!("{first} ({} more follow)", count - 1)
    } else {
        first.to_owned()
    }
}

fn describe_error(token: &Token<'_>) -> String {
    match token.bytes() {
        [b'"' | b'\'', ..] => "unterminated string literal".to_owned(),
        [b'`', ..] => "unterminated quoted symbol".to_owned(),
        [b'%', ..] => "unterminated user operator".to_owned(),
        [b']', ..] => "`]` does not close an open bracket".to_owned(),
        [b'0'..=b'9' | b'.', ..] => format!("malformed number `{}`", token.contents()),
        [b] => format!("unexpected byte 0x{b:02X}"),
        _ => format!("unexpected input `{}`", token.contents()),
    }
}
