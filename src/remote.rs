// Browsable web URLs for git remotes

/// Turn a clone URL into the URL of the project's web page
///
/// SSH (`git@host:owner/repo.git`) and HTTPS remotes are supported. With a
/// branch, GitHub and GitLab URLs point at that branch's tree.
pub fn web_url(remote: &str, branch: Option<&str>) -> String {
    let remote = remote.trim();
    if remote.is_empty() {
        return String::new();
    }

    let base = if let Some(rest) = remote.strip_prefix("git@") {
        format!("https://{}", rest.replacen(':', "/", 1))
    } else if let Some(rest) = remote.strip_prefix("ssh://git@") {
        format!("https://{}", rest)
    } else {
        remote.to_string()
    };
    let base = base.strip_suffix(".git").unwrap_or(&base).to_string();

    match branch {
        Some(branch) if !branch.is_empty() && branch != "HEAD" => {
            if base.contains("github.com") {
                format!("{}/tree/{}", base, branch)
            } else if base.contains("gitlab.com") {
                format!("{}/-/tree/{}", base, branch)
            } else {
                base
            }
        }
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssh_remote() {
        assert_eq!(
            web_url("git@github.com:rust-lang/cargo.git", None),
            "https://github.com/rust-lang/cargo"
        );
    }

    #[test]
    fn test_https_remote_with_branch() {
        assert_eq!(
            web_url("https://github.com/rust-lang/cargo.git", Some("master")),
            "https://github.com/rust-lang/cargo/tree/master"
        );
        assert_eq!(
            web_url("git@gitlab.com:group/sub/proj.git", Some("dev")),
            "https://gitlab.com/group/sub/proj/-/tree/dev"
        );
    }

    #[test]
    fn test_other_hosts_ignore_branch() {
        assert_eq!(
            web_url("https://git.example.org/team/tool", Some("main")),
            "https://git.example.org/team/tool"
        );
        assert_eq!(
            web_url("ssh://git@github.com/me/x.git", Some("HEAD")),
            "https://github.com/me/x"
        );
    }

    #[test]
    fn test_empty_remote() {
        assert_eq!(web_url("", Some("main")), "");
    }
}
