//! Build details embedded by `build.rs`, shown by the `version` command.

const UNKNOWN: &str = "unknown";

macro_rules! build_env {
    ($name:literal) => {
        match option_env!($name) {
            Some(value) => value,
            None => UNKNOWN,
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub commit: &'static str,
    /// `clean`, `dirty`, or `unknown` outside a git checkout.
    pub tree: &'static str,
    pub built_at: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub const CURRENT: BuildMetadata = BuildMetadata {
    version: env!("CARGO_PKG_VERSION"),
    commit: build_env!("BUDGET_DASH_BUILD_HASH"),
    tree: build_env!("BUDGET_DASH_BUILD_STATUS"),
    built_at: build_env!("BUDGET_DASH_BUILD_TIMESTAMP"),
    target: build_env!("BUDGET_DASH_BUILD_TARGET"),
    profile: build_env!("BUDGET_DASH_BUILD_PROFILE"),
    rustc: build_env!("BUDGET_DASH_BUILD_RUSTC"),
};

impl BuildMetadata {
    /// `0.1.0 (abc1234)`, with a `+dirty` marker for uncommitted builds.
    pub fn headline(&self) -> String {
        let dirty = if self.tree == "dirty" { "+dirty" } else { "" };
        format!("{} ({}{})", self.version, self.commit, dirty)
    }

    pub fn rows(&self) -> [(&'static str, &'static str); 4] {
        [
            ("Built at", self.built_at),
            ("Target", self.target),
            ("Profile", self.profile),
            ("Rustc", self.rustc),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_marks_dirty_trees() {
        let meta = BuildMetadata {
            version: "1.2.3",
            commit: "abc1234",
            tree: "dirty",
            ..CURRENT
        };
        assert_eq!(meta.headline(), "1.2.3 (abc1234+dirty)");
        let clean = BuildMetadata { tree: "clean", ..meta };
        assert_eq!(clean.headline(), "1.2.3 (abc1234)");
    }

    #[test]
    fn current_carries_package_version() {
        assert_eq!(CURRENT.version, env!("CARGO_PKG_VERSION"));
        assert!(!CURRENT.commit.is_empty());
    }
}
