// Build-time version and provenance

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Git commit, expected to be set by the build (`GIT_COMMIT=$(git rev-parse HEAD) cargo build`).
pub const GIT_COMMIT: &str = match option_env!("GIT_COMMIT") {
    Some(commit) => commit,
    None => "",
};

/// OS version of the build host (`uname --kernel-release`), set the same way as `GIT_COMMIT`.
pub const OS_VERSION: &str = match option_env!("OS_VERSION") {
    Some(os) => os,
    None => "",
};
