#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    // Crate roots and module files carry no logic of their own
    fn is_organizational(path: &Path) -> bool {
        matches!(
            path.file_name().and_then(|name| name.to_str()),
            Some("main.rs" | "lib.rs" | "mod.rs")
        )
    }

    // Every `.rs` file below `root`, relative to it
    fn rust_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut files = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let relative = path.strip_prefix(root).map_err(io::Error::other)?;
                    files.insert(relative.to_path_buf());
                }
            }
        }

        Ok(files)
    }

    fn mirrored_sources() -> (BTreeSet<PathBuf>, BTreeSet<PathBuf>) {
        let keep = |root: &str| -> BTreeSet<PathBuf> {
            rust_files(Path::new(root))
                .expect("Readable source tree")
                .into_iter()
                .filter(|path| !is_organizational(path))
                .collect()
        };
        (keep("src"), keep("tests/unit"))
    }

    fn listing(paths: &[&PathBuf], prefix: &str) -> String {
        paths
            .iter()
            .map(|path| format!("  - {prefix}{}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests each source file has a unit test file at the same relative path
    // Verified by adding a src file without a test counterpart
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let (sources, tests) = mirrored_sources();
        let missing: Vec<_> = sources.difference(&tests).collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests under tests/unit:\n{}",
            listing(&missing, "src/")
        );
    }

    // Tests no unit test file outlives the source file it mirrors
    // Verified by deleting a src file and keeping its test
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let (sources, tests) = mirrored_sources();
        let orphaned: Vec<_> = tests.difference(&sources).collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a src counterpart:\n{}",
            listing(&orphaned, "tests/unit/")
        );
    }

    // Tests every non-organizational test file declares at least one test
    // Verified by emptying a unit test module
    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let empty: Vec<_> = rust_files(tests_dir)
            .expect("Readable tests directory")
            .into_iter()
            .filter(|path| !is_organizational(path))
            .filter(|path| {
                let content = fs::read_to_string(tests_dir.join(path)).unwrap_or_default();
                !content.contains("#[test]")
            })
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] functions:\n{}",
            listing(&empty.iter().collect::<Vec<_>>(), "tests/")
        );
    }
}
