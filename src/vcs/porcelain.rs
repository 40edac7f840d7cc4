/// Parsers for the machine-readable output of `git status` and `git log`
use crate::vcs::{short_commit, CommitRecord, FileChange, WorkingTreeStatus};
use chrono::DateTime;
use regex::Regex;
use std::sync::OnceLock;

/// Field separator used in the `git log` format string
pub const FIELD_SEP: char = '\x1f';
/// Record separator used in the `git log` format string
pub const RECORD_SEP: char = '\x1e';

/// `--format` argument matching [`parse_log`]
pub const LOG_FORMAT: &str = "--format=%H%x1f%aI%x1f%an%x1f%s%x1e";

fn tracking_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(ahead|behind) (\d+)").expect("valid tracking regex"))
}

/// Branch header of `git status --branch`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchHeader {
    pub branch: Option<String>,
    pub upstream: Option<String>,
    pub ahead: usize,
    pub behind: usize,
}

/// Parse the text after `## ` in a status branch header
pub fn parse_branch_header(header: &str) -> BranchHeader {
    let mut result = BranchHeader::default();

    let (refs, tracking) = match header.find(" [") {
        Some(idx) => (&header[..idx], Some(&header[idx + 2..])),
        None => (header, None),
    };

    if let Some(rest) = refs.strip_prefix("No commits yet on ") {
        result.branch = Some(rest.trim().to_string());
    } else if let Some(rest) = refs.strip_prefix("Initial commit on ") {
        result.branch = Some(rest.trim().to_string());
    } else if refs.starts_with("HEAD (no branch)") {
        result.branch = None;
    } else if let Some((local, upstream)) = refs.split_once("...") {
        result.branch = Some(local.to_string());
        result.upstream = Some(upstream.trim().to_string());
    } else {
        result.branch = Some(refs.trim().to_string());
    }

    if let Some(tracking) = tracking {
        for caps in tracking_regex().captures_iter(tracking) {
            let count = caps[2].parse::<usize>().unwrap_or(0);
            match &caps[1] {
                "ahead" => result.ahead = count,
                _ => result.behind = count,
            }
        }
    }

    result
}

/// Parse `git status --porcelain=v1 --branch -z` output
pub fn parse_status(output: &str) -> WorkingTreeStatus {
    let mut status = WorkingTreeStatus::default();
    let mut fields = output.split('\0').filter(|f| !f.is_empty());

    while let Some(entry) = fields.next() {
        if let Some(header) = entry.strip_prefix("## ") {
            let header = parse_branch_header(header);
            status.ahead = header.ahead;
            status.behind = header.behind;
            status.upstream = header.upstream;
            continue;
        }

        let mut chars = entry.chars();
        let (Some(index), Some(worktree)) = (chars.next(), chars.next()) else {
            continue;
        };
        // "XY PATH"
        let path = entry.get(3..).unwrap_or("");
        if path.is_empty() {
            continue;
        }

        // Renames and copies carry the source path as the next field
        if matches!(index, 'R' | 'C') || matches!(worktree, 'R' | 'C') {
            fields.next();
        }

        status
            .changed_files
            .push(FileChange::from_columns(path, index, worktree));
    }

    status
}

/// Parse `git log` output produced with [`LOG_FORMAT`]
pub fn parse_log(output: &str) -> Vec<CommitRecord> {
    output
        .split(RECORD_SEP)
        .map(|record| record.trim_start_matches(['\n', '\r']))
        .filter(|record| !record.trim().is_empty())
        .filter_map(|record| {
            let mut parts = record.splitn(4, FIELD_SEP);
            let hash = parts.next()?.trim();
            let date = parts.next()?.trim();
            let author = parts.next()?.trim();
            let message = parts.next().unwrap_or("").trim_end();

            Some(CommitRecord {
                hash: short_commit(hash),
                message: message.to_string(),
                date: normalize_date(date),
                author_name: author.to_string(),
            })
        })
        .collect()
}

/// Normalize a git ISO date to RFC 3339, leaving unparseable input untouched
fn normalize_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.to_rfc3339())
        .unwrap_or_else(|_| raw.to_string())
}
