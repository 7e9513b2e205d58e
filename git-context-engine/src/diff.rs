//! Combines per-file patches into the single text blob sent for review.

use crate::git_providers::types::FileChange;

/// Concatenates `"\nFile: <filename>\n<patch>\n"` for every file that has a
/// non-empty patch, in input order. Files without a patch are skipped.
pub fn aggregate_patches(files: &[FileChange]) -> String {
    let mut out = String::new();
    for file in files {
        if let Some(patch) = file.patch_text() {
            out.push_str("\nFile: ");
            out.push_str(&file.filename);
            out.push('\n');
            out.push_str(patch);
            out.push('\n');
        }
    }
    out
}

/// Number of files that contribute to [`aggregate_patches`].
pub fn count_with_patch(files: &[FileChange]) -> usize {
    files.iter().filter(|f| f.patch_text().is_some()).count()
}
