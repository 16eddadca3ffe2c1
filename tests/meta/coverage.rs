//! Checks that every source file has a mirrored unit test file

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Entry points and module organization files don't require separate test files
    fn is_exempt(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn relative_paths(dir: &Path, base: &Path, paths: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_| io::Error::other("Failed to strip prefix"))?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                paths.insert(relative);
                relative_paths(&path, base, paths)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(())
    }

    fn collect(dir: &str) -> BTreeSet<String> {
        let base = Path::new(dir);
        let mut paths = BTreeSet::new();
        if let Err(error) = relative_paths(base, base, &mut paths) {
            assert!(!base.exists(), "Failed to read {dir}: {error}");
        }
        paths
    }

    // Tests every source file has a unit test file at the same relative path
    // Verified by deleting tests/unit/spatial/grid.rs
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src = collect(SRC_DIR);
        let unit = collect(UNIT_DIR);

        let missing: Vec<String> = src
            .iter()
            .filter(|path| !is_exempt(path) && !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "The following src files/directories are missing unit test counterparts:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives the source file it mirrors
    // Verified by adding an empty tests/unit/spatial/orphan.rs
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src = collect(SRC_DIR);
        let unit = collect(UNIT_DIR);

        let orphaned: Vec<String> = unit
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src.contains(*path))
            .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "The following unit test files/directories have no corresponding src files:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every unit test file is declared by its directory's mod.rs, so it is compiled
    // Verified by removing `pub mod grid;` from tests/unit/spatial/mod.rs
    #[test]
    fn test_all_unit_tests_are_declared() {
        let unit = collect(UNIT_DIR);
        let mut undeclared = Vec::new();

        for path in unit.iter().filter(|path| !path.ends_with("mod.rs")) {
            let file = Path::new(UNIT_DIR).join(path);
            let Some(stem) = file.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let parent = file.parent().unwrap_or_else(|| Path::new(UNIT_DIR));
            let module_file = parent.join("mod.rs");
            let declaration = format!("pub mod {stem};");

            let declared = fs::read_to_string(&module_file)
                .is_ok_and(|content| content.lines().any(|line| line.trim() == declaration));
            if !declared {
                undeclared.push(format!("  - {} not in {}", path, module_file.display()));
            }
        }

        assert!(
            undeclared.is_empty(),
            "The following unit test files are never compiled:\n{}",
            undeclared.join("\n")
        );
    }

    fn files_without_tests(dir: &Path, base: &Path, found: &mut Vec<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                files_without_tests(&path, base, found)?;
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            // Module organization and entry point files are excluded from test requirement
            if (path.parent() == Some(base) && file_name == "main.rs") || file_name == "mod.rs" {
                continue;
            }

            if !fs::read_to_string(&path)?.contains("#[test]") {
                found.push(format!("  - {}", path.display()));
            }
        }
        Ok(())
    }

    // Tests every file under tests/ defines at least one test
    // Verified by removing the tests from tests/unit/io/configuration.rs
    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let mut found = Vec::new();

        if let Err(error) = files_without_tests(tests_dir, tests_dir, &mut found) {
            assert!(!tests_dir.exists(), "Failed to scan tests directory: {error}");
        }

        assert!(
            found.is_empty(),
            "The following test files don't contain any #[test] functions:\n{}",
            found.join("\n")
        );
    }
}
