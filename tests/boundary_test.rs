use np::boundary::BoundaryWarning;

#[test]
fn test_boundary_warning_uncommitted_changes_display() {
    let warning = BoundaryWarning::UncommittedChanges {
        files: vec!["a.js".to_string(), "b.js".to_string()],
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("继续操作"),
        "Message should contain the continue notice, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("2 uncommitted"),
        "Message should count the files, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_history_unavailable_display() {
    let warning = BoundaryWarning::HistoryUnavailable {
        from: "pkg@1.0.0".to_string(),
        to: "pkg@1.0.1".to_string(),
        reason: "unknown revision 'pkg@1.0.0'".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("pkg@1.0.0...pkg@1.0.1"),
        "Message should contain the range, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("release notes left empty"),
        "Message should explain the fallback, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_no_commits_display() {
    let warning = BoundaryWarning::NoCommitsInRange {
        from: "pkg@1.0.0".to_string(),
        to: "pkg@1.0.1".to_string(),
    };

    assert_eq!(
        warning.to_string(),
        "No commits between 'pkg@1.0.0' and 'pkg@1.0.1'"
    );
}

#[test]
fn test_boundary_warning_browser_launch_failed_display() {
    let warning = BoundaryWarning::BrowserLaunchFailed {
        url: "https://github.com/foo/bar/releases/new?tag=x".to_string(),
        reason: "xdg-open not found".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("https://github.com/foo/bar/releases/new?tag=x"),
        "Message should contain the URL, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("xdg-open not found"),
        "Message should contain the reason, got: {}",
        display_msg
    );
}
