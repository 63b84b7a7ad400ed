use chrono::{DateTime, FixedOffset};

use crate::hash::{CommitHash, is_valid_hash};
use crate::models::{Commit, Identity};

/// Field separator Git emits between the 10 log fields (`%x00`).
pub const FIELD_SEP: char = '\u{0000}';
/// Record separator Git emits after each commit (`%x01`).
pub const RECORD_SEP: char = '\u{0001}';

const EXPECTED_FIELDS: usize = 9;
const PREVIEW_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    MalformedRecord,
    InvalidHash,
    InvalidDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub record_preview: Option<String>,
    pub field: Option<String>,
}

impl ParseError {
    fn new(kind: ParseErrorKind, message: impl Into<String>, record: &str) -> Self {
        Self {
            kind,
            message: message.into(),
            record_preview: Some(truncate_preview(record)),
            field: None,
        }
    }

    fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }
}

fn truncate_preview(record: &str) -> String {
    if record.len() <= PREVIEW_LIMIT {
        return record.to_string();
    }
    let mut end = PREVIEW_LIMIT;
    while !record.is_char_boundary(end) {
        end -= 1;
    }
    record[..end].to_string()
}

/// Parsing a log buffer never hard-fails: malformed records are dropped and
/// reported via `errors`, while parsing continues for the rest of the
/// buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLog {
    pub commits: Vec<Commit>,
    pub errors: Vec<ParseError>,
}

/// Parse a buffer produced by
/// `git log --pretty=format:%H%x00%P%x00%an%x00%ae%x00%aI%x00%cn%x00%ce%x00%cI%x00%s%x00%b%x01`.
pub fn parse_git_log(buffer: &str) -> ParsedLog {
    let mut out = ParsedLog::default();

    for raw_record in buffer.split(RECORD_SEP) {
        if raw_record.is_empty() {
            continue;
        }

        let fields: Vec<&str> = raw_record.split(FIELD_SEP).collect();
        if fields.len() < EXPECTED_FIELDS {
            out.errors.push(ParseError::new(
                ParseErrorKind::MalformedRecord,
                format!(
                    "expected at least {EXPECTED_FIELDS} fields, found {}",
                    fields.len()
                ),
                raw_record,
            ));
            continue;
        }

        let hash_raw = fields[0].trim().to_lowercase();
        if !is_valid_hash(&hash_raw) {
            out.errors.push(
                ParseError::new(
                    ParseErrorKind::InvalidHash,
                    format!("{:?} is not 40 lowercase hex characters", fields[0]),
                    raw_record,
                )
                .with_field("hash"),
            );
            continue;
        }
        let hash = CommitHash::new_unchecked(hash_raw);

        let parents = fields[1]
            .split_whitespace()
            .filter_map(|p| {
                let lowered = p.to_lowercase();
                is_valid_hash(&lowered).then(|| CommitHash::new_unchecked(lowered))
            })
            .collect();

        let authored_at = match parse_iso_date(fields[4]) {
            Some(dt) => dt,
            None => {
                out.errors.push(
                    ParseError::new(
                        ParseErrorKind::InvalidDate,
                        format!("{:?} is not a valid ISO-8601 date", fields[4]),
                        raw_record,
                    )
                    .with_field("authored_at"),
                );
                continue;
            }
        };
        let committed_at = match parse_iso_date(fields[7]) {
            Some(dt) => dt,
            None => {
                out.errors.push(
                    ParseError::new(
                        ParseErrorKind::InvalidDate,
                        format!("{:?} is not a valid ISO-8601 date", fields[7]),
                        raw_record,
                    )
                    .with_field("committed_at"),
                );
                continue;
            }
        };

        let body = if fields.len() > EXPECTED_FIELDS {
            fields[EXPECTED_FIELDS..].join(&FIELD_SEP.to_string())
        } else {
            String::new()
        };

        out.commits.push(Commit {
            hash,
            parents,
            author: Identity {
                name: fields[2].to_string(),
                email: fields[3].to_string(),
            },
            committer: Identity {
                name: fields[5].to_string(),
                email: fields[6].to_string(),
            },
            authored_at,
            committed_at,
            subject: fields[8].to_string(),
            body: body.trim().to_string(),
        });
    }

    out
}

fn parse_iso_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw.trim()).ok()
}
