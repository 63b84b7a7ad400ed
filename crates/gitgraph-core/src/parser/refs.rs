use crate::hash::CommitHash;
use crate::models::{GitRef, RefKind};

const HEADS_PREFIX: &str = "refs/heads/";
const REMOTES_PREFIX: &str = "refs/remotes/";
const TAGS_PREFIX: &str = "refs/tags/";

/// Parse a buffer produced by
/// `for-each-ref --format='%(objectname) %(refname) %(objecttype)'`.
///
/// `head_branch` is the short name of the current branch (from
/// `symbolic-ref --short HEAD`), used to flag the local branch that is
/// currently checked out. Lines with an unrecognized ref prefix, or whose
/// target hash fails validation, are silently skipped — not an error.
pub fn parse_refs(buffer: &str, head_branch: Option<&str>) -> Vec<GitRef> {
    buffer
        .lines()
        .filter_map(|line| parse_ref_line(line, head_branch))
        .collect()
}

fn parse_ref_line(line: &str, head_branch: Option<&str>) -> Option<GitRef> {
    let mut parts = line.split_ascii_whitespace();
    let hash_raw = parts.next()?;
    let full_name = parts.next()?;
    let object_type = parts.next().unwrap_or("commit");

    let target = CommitHash::parse(&hash_raw.to_lowercase()).ok()?;

    if let Some(name) = full_name.strip_prefix(HEADS_PREFIX) {
        return Some(GitRef {
            name: name.to_string(),
            full_name: full_name.to_string(),
            target,
            kind: RefKind::LocalBranch {
                is_head: Some(name) == head_branch,
                is_protected: false,
            },
        });
    }

    if let Some(name) = full_name.strip_prefix(REMOTES_PREFIX) {
        if name.ends_with("/HEAD") {
            return None;
        }
        let remote_name = name.split('/').next().unwrap_or(name).to_string();
        return Some(GitRef {
            name: name.to_string(),
            full_name: full_name.to_string(),
            target,
            kind: RefKind::RemoteBranch {
                remote_name,
                is_protected: false,
            },
        });
    }

    if let Some(name) = full_name.strip_prefix(TAGS_PREFIX) {
        return Some(GitRef {
            name: name.to_string(),
            full_name: full_name.to_string(),
            target,
            kind: RefKind::Tag {
                is_annotated: object_type == "tag",
            },
        });
    }

    None
}

/// Parse a `git log --decorate=full` decoration string (the comma-separated
/// token list Git prints inside `(...)` after a commit hash) for callers
/// that only captured decorated log output and have no separate
/// `for-each-ref` buffer. `commit_hash` is the owning commit, since
/// decoration tokens carry no object hash of their own.
///
/// This is an alternate source for the same [`GitRef`] model the
/// `for-each-ref` parser produces; the `HEAD ->` marker and bare `HEAD`
/// token are both treated as flagging the following/self branch as checked
/// out. Unrecognized tokens (notes refs, stash) are skipped.
pub fn refs_from_decoration(decoration: &str, commit_hash: &CommitHash) -> Vec<GitRef> {
    let cleaned = decoration.trim().trim_start_matches('(').trim_end_matches(')');
    if cleaned.is_empty() {
        return Vec::new();
    }

    cleaned
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| decoration_token_to_ref(token, commit_hash))
        .collect()
}

fn decoration_token_to_ref(token: &str, commit_hash: &CommitHash) -> Option<GitRef> {
    if let Some(rest) = token.strip_prefix("HEAD -> ") {
        return full_name_to_ref(rest.trim(), commit_hash, true);
    }
    if token == "HEAD" {
        return None;
    }
    if let Some(rest) = token.strip_prefix("tag: ") {
        return full_name_to_ref(&format!("{TAGS_PREFIX}{}", rest.trim()), commit_hash, false);
    }
    full_name_to_ref(token, commit_hash, false)
}

fn full_name_to_ref(full_name: &str, commit_hash: &CommitHash, is_head: bool) -> Option<GitRef> {
    if let Some(name) = full_name.strip_prefix(HEADS_PREFIX) {
        return Some(GitRef {
            name: name.to_string(),
            full_name: full_name.to_string(),
            target: commit_hash.clone(),
            kind: RefKind::LocalBranch {
                is_head,
                is_protected: false,
            },
        });
    }
    if let Some(name) = full_name.strip_prefix(REMOTES_PREFIX) {
        let remote_name = name.split('/').next().unwrap_or(name).to_string();
        return Some(GitRef {
            name: name.to_string(),
            full_name: full_name.to_string(),
            target: commit_hash.clone(),
            kind: RefKind::RemoteBranch {
                remote_name,
                is_protected: false,
            },
        });
    }
    if let Some(name) = full_name.strip_prefix(TAGS_PREFIX) {
        return Some(GitRef {
            name: name.to_string(),
            full_name: full_name.to_string(),
            target: commit_hash.clone(),
            kind: RefKind::Tag { is_annotated: false },
        });
    }
    None
}
