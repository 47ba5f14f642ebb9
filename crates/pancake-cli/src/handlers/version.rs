//! Version command handler.

/// Version line printed by `pancake version`.
pub fn version_line() -> String {
    format!("pancake {}", env!("CARGO_PKG_VERSION"))
}

/// Print the version.
pub fn execute() {
    println!("{}", version_line());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_comes_from_the_package() {
        assert_eq!(version_line(), format!("pancake {}", env!("CARGO_PKG_VERSION")));
        assert!(version_line().starts_with("pancake 1."));
    }
}
