use crate::hash::CommitHash;

/// Result of resolving HEAD from `symbolic-ref --short HEAD` and
/// `rev-parse HEAD` output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadInfo {
    pub head_ref: Option<String>,
    pub head_commit: Option<CommitHash>,
}

/// `head_branch` is the raw stdout of `symbolic-ref --short HEAD` (empty on
/// detached HEAD). `head_commit` is the raw stdout of `rev-parse HEAD`
/// (empty on an empty repository).
pub fn parse_head(head_branch: Option<&str>, head_commit: Option<&str>) -> HeadInfo {
    let head_ref = head_branch
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string);

    let head_commit = head_commit
        .map(str::trim)
        .map(str::to_lowercase)
        .and_then(|s| CommitHash::parse(&s).ok());

    HeadInfo {
        head_ref,
        head_commit,
    }
}
