//! Shell and environment detection.

/// Detect the current shell.
pub fn detect_shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
}

/// Get the flag to pass commands to the shell.
///
/// Uses `-lc` (login shell) on Unix so that the user's full shell
/// environment is available. Tools like minikube, kubectl, and helm are
/// often installed into directories that only land on PATH via
/// `.zprofile`/`.bash_profile`. Without `-l`, check commands fail with
/// "command not found" even though the tool is installed.
pub fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-lc"
    }
}

/// Check whether we are running under a CI system.
pub fn is_ci() -> bool {
    const CI_VARS: &[&str] = &[
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "BUILDKITE",
        "JENKINS_URL",
    ];
    CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
}
