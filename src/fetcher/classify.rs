// src/fetcher/classify.rs
// =============================================================================
// Decides, per tree entry, whether to descend into it, download it, or skip.
//
// Directories:
// - at the repository root, the folded name must EXACTLY equal a keyword
//   (the root list also allows "test" and "tests")
// - below the root, the folded name only has to CONTAIN a keyword, so
//   "api-docs-v2" or "examples_old" still count
//
// Files (the denylist is checked first and always wins):
// - root-level project files (readme, changelog, license, install...)
// - documentation extensions (.md, .mdx, .rst, readme .txt)
// - notebooks (.ipynb)
// - .py/.json files somewhere under a docs/examples/src-like path
//
// Everything here is a pure function of its inputs, so it is tested directly.
// =============================================================================

use crate::github::EntryKind;

const RELEVANT_DIRS: &[&str] = &[
    "doc", "docs", "example", "examples", "tutorial", "tutorials", "guide", "guides", "src",
    "lib", "cookbook",
];

const ROOT_ONLY_DIRS: &[&str] = &["test", "tests"];

const IMPORTANT_ROOT_FILES: &[&str] = &[
    "readme",
    "changelog",
    "contributing",
    "authors",
    "license",
    "security",
    "getting_started",
    "quickstart",
    "install",
    "setup",
];

// Compared against the case-folded file name, so every entry is lowercase
const EXCLUDED_FILES: &[&str] = &[
    ".gitignore",
    "requirements.txt",
    "setup.py",
    "makefile",
    "docker-compose.yml",
];

const DOC_EXTENSIONS: &[&str] = &[".md", ".mdx", ".rst"];

// Path fragments that make .py and .json files worth keeping
const RELEVANT_PATH_FRAGMENTS: &[&str] = &["doc", "example", "tutorial", "cookbook", "src", "lib"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Descend,
    Materialize,
    Skip,
}

// Classifies one entry of a directory listing
//
// Parameters:
//   name: the entry's own name (no slashes)
//   kind: directory / file / other
//   parent_path: remote path of the directory being listed ("" at the root)
//   is_root_level: true only while listing the repository root
pub fn classify(name: &str, kind: EntryKind, parent_path: &str, is_root_level: bool) -> Decision {
    match kind {
        EntryKind::Directory if is_relevant_dir(name, is_root_level) => Decision::Descend,
        EntryKind::File if is_relevant_file(name, is_root_level, parent_path) => {
            Decision::Materialize
        }
        _ => Decision::Skip,
    }
}

pub fn is_relevant_dir(name: &str, is_root_level: bool) -> bool {
    let lower = name.to_lowercase();

    if is_root_level {
        return RELEVANT_DIRS
            .iter()
            .chain(ROOT_ONLY_DIRS)
            .any(|dir| lower == *dir);
    }

    RELEVANT_DIRS.iter().any(|dir| lower.contains(dir))
}

pub fn is_relevant_file(name: &str, is_root_level: bool, parent_path: &str) -> bool {
    let lower = name.to_lowercase();

    if EXCLUDED_FILES.contains(&lower.as_str()) {
        return false;
    }

    if is_root_level && IMPORTANT_ROOT_FILES.iter().any(|f| lower.contains(f)) {
        return true;
    }

    let ext = extension(&lower);

    if DOC_EXTENSIONS.contains(&ext) || (ext == ".txt" && lower.contains("readme")) {
        return true;
    }

    if ext == ".ipynb" {
        return true;
    }

    if ext == ".py" || ext == ".json" {
        let path = parent_path.to_lowercase();
        return RELEVANT_PATH_FRAGMENTS.iter().any(|f| path.contains(f));
    }

    false
}

// Everything from the last dot on, dot included ("" when there is none).
// ".gitignore" is all extension.
fn extension(name: &str) -> &str {
    name.rfind('.').map(|i| &name[i..]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_keywords_match_at_every_level() {
        for dir in RELEVANT_DIRS {
            assert!(is_relevant_dir(dir, true), "{} at root", dir);
            assert!(is_relevant_dir(dir, false), "{} below root", dir);
        }
    }

    #[test]
    fn test_test_dirs_only_at_root() {
        for dir in ["test", "tests", "Tests"] {
            assert!(is_relevant_dir(dir, true));
            assert!(!is_relevant_dir(dir, false));
        }
    }

    #[test]
    fn test_root_match_is_exact() {
        assert!(!is_relevant_dir("library-extras", true));
        assert!(is_relevant_dir("library-extras", false));
        assert!(!is_relevant_dir("library-utils", true));
        assert!(is_relevant_dir("api-docs-v2", false));
        assert!(is_relevant_dir("DOCS", true));
    }

    #[test]
    fn test_unrelated_dirs() {
        assert!(!is_relevant_dir(".github", true));
        assert!(!is_relevant_dir("scripts", false));
        assert!(!is_relevant_dir("node_modules", false));
    }

    #[test]
    fn test_readme_at_root() {
        assert!(is_relevant_file("README.md", true, ""));
        assert!(is_relevant_file("LICENSE", true, ""));
        assert!(is_relevant_file("CONTRIBUTING", true, ""));
    }

    #[test]
    fn test_important_names_only_count_at_root() {
        assert!(!is_relevant_file("LICENSE", false, "docs"));
        assert!(is_relevant_file("readme.txt", false, "pkg"));
    }

    #[test]
    fn test_txt_needs_readme() {
        assert!(!is_relevant_file("notes.txt", false, "docs"));
        assert!(!is_relevant_file("notes.txt", true, ""));
    }

    #[test]
    fn test_doc_extensions_anywhere() {
        assert!(is_relevant_file("guide.MDX", false, "website/pages"));
        assert!(is_relevant_file("index.rst", false, "anything"));
        assert!(is_relevant_file("walkthrough.ipynb", false, "notebooks"));
    }

    #[test]
    fn test_denylist_vetoes_inclusion() {
        // "setup" would match the root-level list, but the denylist wins
        assert!(!is_relevant_file("setup.py", true, ""));
        assert!(!is_relevant_file("setup.py", false, "src/pkg"));
        assert!(!is_relevant_file("Makefile", true, ""));
        assert!(!is_relevant_file("requirements.txt", true, ""));
        assert!(!is_relevant_file(".gitignore", false, "docs"));
        // Not on the denylist: root-level "setup" still applies
        assert!(is_relevant_file("setup.cfg", true, ""));
    }

    #[test]
    fn test_code_files_need_relevant_path() {
        assert!(is_relevant_file("example.json", false, "examples/configs"));
        assert!(is_relevant_file("main.py", false, "src/pkg"));
        assert!(is_relevant_file("conf.py", false, "Docs/source"));
        assert!(!is_relevant_file("main.py", false, "scripts"));
        assert!(!is_relevant_file("package.json", true, ""));
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("readme.md"), ".md");
        assert_eq!(extension("archive.tar.gz"), ".gz");
        assert_eq!(extension(".gitignore"), ".gitignore");
        assert_eq!(extension("license"), "");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("docs", EntryKind::Directory, "", true), Decision::Descend);
        assert_eq!(classify("scripts", EntryKind::Directory, "", true), Decision::Skip);
        assert_eq!(classify("README.md", EntryKind::File, "", true), Decision::Materialize);
        assert_eq!(classify("logo.png", EntryKind::File, "docs", false), Decision::Skip);
        // A submodule named like a docs dir is still skipped
        assert_eq!(classify("docs", EntryKind::Other, "", true), Decision::Skip);
    }
}
