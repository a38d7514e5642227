// Version and build information

/// Build information baked in by build.rs
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_date: &'static str,
    pub git_hash: &'static str,
    pub target_triple: &'static str,
    pub profile: &'static str,
}

/// Get current build information
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        build_date: option_env!("BUILD_DATE").unwrap_or("unknown"),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        target_triple: option_env!("BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("BUILD_PROFILE").unwrap_or("unknown"),
    }
}

impl BuildInfo {
    pub fn format_display(&self) -> String {
        if self.git_hash == "unknown" {
            format!("unitstat v{}", self.version)
        } else {
            format!("unitstat v{} (commit {})", self.version, self.git_hash)
        }
    }

    pub fn format_build_info(&self) -> String {
        format!(
            "Build: {}\nTarget: {}\nProfile: {}\nGit: {}",
            self.build_date, self.target_triple, self.profile, self.git_hash
        )
    }
}
