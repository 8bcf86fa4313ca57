//! Hygiene checks over the tradeoff-map source tree.
//!
//! A shell drives `EngineCore` with whatever the user typed or dragged, so the
//! engine must answer with a `Result` instead of crashing, keep every unit
//! value inside `[0, 1]` even when handed NaN, and report through `tracing`
//! so the host decides where diagnostics go. Each pattern below has a budget.
//! Budgets only shrink.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

// Crashes the shell's host process.
const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_UNREACHABLE: usize = 0;
const MAX_TODO: usize = 0;
const MAX_UNIMPLEMENTED: usize = 0;

// Swallows a rejected edit or a bad snapshot without looking at it.
const MAX_SILENT_DISCARD: usize = 0;
const MAX_DOT_OK: usize = 0;

// Unit values: one NaN-aware clamp (`geometry::unit_interval`), and scores
// ordered with `total_cmp` so NaN cannot sort to the top.
const MAX_RAW_UNIT_CLAMP: usize = 1;
const MAX_PARTIAL_CMP: usize = 0;

const MAX_ALLOW_DEAD_CODE: usize = 0;

// Diagnostics go through `tracing`; the host installs the subscriber.
const MAX_PRINTLN: usize = 0;
const MAX_EPRINTLN: usize = 0;
const MAX_DBG: usize = 0;

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`; `_test.rs` siblings are skipped.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

/// Per-file count of lines containing `pattern`, files with no hits omitted.
fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|file| (file.path.clone(), file.content.lines().filter(|line| line.contains(pattern)).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

fn assert_budget(pattern: &str, max: usize, hint: &str) {
    let hits = count_in_source(&source_files(), pattern);
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing: Vec<String> = hits.iter().map(|(path, c)| format!("  {path}: {c}")).collect();
    assert!(
        count <= max,
        "`{pattern}` budget exceeded: found {count}, max {max}. {hint}\n{}",
        listing.join("\n")
    );
}

// =============================================================
// Crashes
// =============================================================

#[test]
fn unwrap_budget() {
    assert_budget(".unwrap()", MAX_UNWRAP, "Return an EngineError instead.");
}

#[test]
fn expect_budget() {
    assert_budget(".expect(", MAX_EXPECT, "Return an EngineError instead.");
}

#[test]
fn panic_budget() {
    assert_budget("panic!(", MAX_PANIC, "");
}

#[test]
fn unreachable_budget() {
    assert_budget("unreachable!(", MAX_UNREACHABLE, "");
}

#[test]
fn todo_budget() {
    assert_budget("todo!(", MAX_TODO, "");
}

#[test]
fn unimplemented_budget() {
    assert_budget("unimplemented!(", MAX_UNIMPLEMENTED, "");
}

// =============================================================
// Discarded errors
// =============================================================

#[test]
fn silent_discard_budget() {
    assert_budget("let _ =", MAX_SILENT_DISCARD, "");
}

#[test]
fn dot_ok_budget() {
    assert_budget(".ok()", MAX_DOT_OK, "");
}

// =============================================================
// Unit values and ordering
// =============================================================

#[test]
fn raw_unit_clamp_budget() {
    assert_budget(".clamp(0.0, 1.0)", MAX_RAW_UNIT_CLAMP, "Use geometry::unit_interval; f64::clamp passes NaN through.");
}

#[test]
fn partial_cmp_budget() {
    assert_budget("partial_cmp(", MAX_PARTIAL_CMP, "Order floats with total_cmp.");
}

#[test]
fn allow_dead_code_budget() {
    assert_budget("#[allow(dead_code)]", MAX_ALLOW_DEAD_CODE, "");
}

// =============================================================
// Output
// =============================================================

#[test]
fn println_budget() {
    assert_budget("println!(", MAX_PRINTLN, "Use tracing.");
}

#[test]
fn eprintln_budget() {
    assert_budget("eprintln!(", MAX_EPRINTLN, "Use tracing.");
}

#[test]
fn dbg_budget() {
    assert_budget("dbg!(", MAX_DBG, "Use tracing.");
}

#[test]
fn source_tree_is_found() {
    // The scans above pass vacuously if cwd is wrong.
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("engine.rs")), "no engine source found under src/");
    assert!(files.iter().any(|f| f.content.contains("pub fn unit_interval")), "unit_interval not found under src/");
}
