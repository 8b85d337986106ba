// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Fake `typst` executables for driving the subprocess backend.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Records its arguments and working directory, writes a two-entry
/// dependency manifest relative to that directory and prints a small HTML
/// document. `query` prints one frontmatter match.
pub const WORKING_TYPST: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
printf '%s\n' "$@" > "$dir/args.log"
pwd -P > "$dir/cwd.log"
deps=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "--deps" ]; then
    deps="$arg"
  fi
  prev="$arg"
done
case "$1" in
  query)
    printf '[{"func":"metadata","value":{"title":"Hello","targets":["pdf"]},"label":"<11typst:frontmatter>"}]'
    ;;
  compile)
    if [ -n "$deps" ]; then
      echo "$deps" >> "$dir/manifests.log"
      printf '{"inputs":["main.typ","sub/b.typ"],"outputs":["-"]}' > "$deps"
    fi
    echo "warning: unused variable" >&2
    printf '<html><body class="x">Hi</body></html>'
    ;;
esac
"#;

/// Compiles without ever writing the dependency manifest.
pub const NO_MANIFEST_TYPST: &str = r#"#!/bin/sh
printf '<html><body>Hi</body></html>'
"#;

/// Fails every invocation the way `typst` reports a source error.
pub const FAILING_TYPST: &str = r#"#!/bin/sh
echo "error: unknown variable: x" >&2
exit 2
"#;

/// Write `script` as an executable file named `typst` under `dir`.
pub fn install(dir: &Path, script: &str) -> PathBuf {
    let path = dir.join("typst");
    fs::write(&path, script).expect("write fake typst");
    let mut perms = fs::metadata(&path).expect("metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("set perms");
    path
}

/// Arguments recorded by the last [`WORKING_TYPST`] run.
pub fn recorded_args(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("args.log"))
        .expect("args.log")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Working directory of the last [`WORKING_TYPST`] run, symlinks resolved.
pub fn recorded_cwd(dir: &Path) -> PathBuf {
    PathBuf::from(
        fs::read_to_string(dir.join("cwd.log"))
            .expect("cwd.log")
            .trim_end(),
    )
}

/// Every manifest path handed to [`WORKING_TYPST`].
pub fn recorded_manifests(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("manifests.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
