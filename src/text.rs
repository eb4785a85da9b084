//! Small text-formatting helpers for presentation layers

/// Regularize a block of text: trim boundary newlines and terminate with
/// exactly one trailing newline. Interior whitespace is left alone.
pub fn regularize_block(block: &str) -> String {
    let mut regularized = block.trim_matches('\n').to_string();
    regularized.push('\n');
    regularized
}
