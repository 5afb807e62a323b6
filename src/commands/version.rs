//! Command: print version information.

/// The version string baked in at build time.
#[must_use]
pub fn version() -> &'static str {
    option_env!("SNEK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the snek version to stdout.
pub fn run() {
    println!("snek {}", version());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
