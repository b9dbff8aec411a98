//! Which repository files make it into a corpus.
//!
//! Two explicit rules: a path is eligible when it ends in one of
//! [`ALLOWED_SUFFIXES`], or when its final segment is exactly one of
//! [`ALLOWED_FILE_NAMES`]. Matching is case-sensitive. Files must also be
//! strictly smaller than the configured size ceiling.

use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::github::TreeEntry;

#[rustfmt::skip]
pub const ALLOWED_SUFFIXES: &[&str] = &[
    // Documentation
    ".md", ".rst", ".txt", ".adoc", ".asciidoc", ".wiki",
    // Web
    ".html", ".htm", ".css", ".scss", ".sass", ".less", ".js", ".jsx", ".ts", ".tsx", ".vue",
    ".mjs", ".cjs",
    // Configuration
    ".json", ".yaml", ".yml", ".toml", ".ini", ".cfg", ".conf", ".config", ".properties",
    ".env", ".rc", ".lock",
    // Python
    ".py", ".pyi", ".pyw", ".pyx", ".pxd", ".pxi",
    // JVM
    ".java", ".kt", ".kts", ".scala", ".groovy", ".clj", ".cljs", ".cljc", ".edn",
    // C and C++
    ".c", ".h", ".cpp", ".hpp", ".cc", ".hh", ".cxx", ".hxx", ".inl",
    // Go
    ".go", ".mod", ".sum",
    // Rust
    ".rs",
    // PHP
    ".php", ".phtml", ".php3", ".php4", ".php5", ".php7", ".phps",
    // Ruby
    ".rb", ".rbw", ".rake", ".gemspec",
    // Swift and Dart
    ".swift", ".swiftinterface", ".dart",
    // Shell
    ".sh", ".bash", ".zsh", ".fish", ".csh", ".tcsh", ".ksh", ".mksh",
    // SQL
    ".sql", ".psql", ".mysql",
    // R, MATLAB, Julia, Lua
    ".r", ".R", ".m", ".jl", ".lua",
    // Perl
    ".pl", ".pm", ".pod", ".t",
    // Haskell
    ".hs", ".lhs", ".cabal", ".hsc",
    // F#
    ".fs", ".fsi", ".fsx",
    // OCaml
    ".ml", ".mli", ".mll", ".mly",
    // Elixir and Erlang
    ".ex", ".exs", ".heex", ".eex", ".erl", ".hrl", ".escript",
    // Nim, Crystal, Zig, V, Odin
    ".nim", ".nimble", ".cr", ".ecr", ".zig", ".v", ".odin",
    // Assembly
    ".asm", ".s", ".S", ".inc",
    // LaTeX
    ".tex", ".ltx", ".sty", ".cls", ".bbl",
    // Markup
    ".xml", ".svg", ".xhtml", ".xslt", ".xsl", ".xsd", ".dtd",
    // Data
    ".csv", ".tsv", ".jsonl", ".jsonc",
    // Build systems
    ".cmake", ".cmake.in", ".ninja", ".gradle", ".bazel", ".bzl", ".buck", ".podspec",
    // Editors
    ".sublime-project",
];

#[rustfmt::skip]
pub const ALLOWED_FILE_NAMES: &[&str] = &[
    // Build systems
    "CMakeLists.txt", "BUILD", "WORKSPACE", "BUCK", "Makefile", "Dockerfile", "Jenkinsfile",
    // Package management
    "package.json", "package-lock.json", "yarn.lock", "pnpm-lock.yaml", "Cargo.lock",
    "Pipfile", "Pipfile.lock", "poetry.lock", "requirements.txt", "setup.py", "setup.cfg",
    "pyproject.toml", "composer.json", "composer.lock", "Gemfile", "Gemfile.lock",
    "Podfile", "Podfile.lock", "pubspec.yaml", "pubspec.lock", "mix.exs", "mix.lock",
    "cabal.project", "stack.yaml", "package.yaml",
    // Editor and VCS
    ".editorconfig", ".project", ".classpath", ".vimrc",
    ".gitignore", ".gitattributes", ".gitmodules", ".dockerignore",
    // CI
    ".gitlab-ci.yml", ".travis.yml", "azure-pipelines.yml", ".drone.yml", ".woodpecker.yml",
    // Documentation
    "README", "LICENSE", "AUTHORS", "CHANGELOG", "CONTRIBUTING",
];

/// Allow-list plus size ceiling, shared by both corpus strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    /// Exclusive ceiling in bytes.
    pub max_file_size: u64,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl FileFilter {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Tree entries: files only, with a known size under the ceiling and an
    /// allowed path.
    pub fn accepts(&self, entry: &TreeEntry) -> bool {
        entry.is_file()
            && entry.size.is_some_and(|size| self.accepts_size(size))
            && is_allowed_path(&entry.path)
    }

    pub fn accepts_size(&self, size: u64) -> bool {
        size < self.max_file_size
    }

    /// Archive members, where size is read from the archive itself.
    pub fn accepts_member(&self, path: &str, size: u64) -> bool {
        self.accepts_size(size) && is_allowed_path(path)
    }
}

pub fn is_allowed_path(path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    ALLOWED_FILE_NAMES.contains(&file_name)
        || ALLOWED_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}
