//! Pure escaping helpers for Markdown output.
//!
//! Fence and tick sizing for code, plus the small amount of escaping links need.
//! Body text is deliberately not escaped: the editor content is prose and the
//! output is meant to be read as written.

/// Longest run of `fence_char` in the content.
fn longest_run(content: &str, fence_char: char) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == fence_char {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    max_run
}

/// Calculate the minimum fence length needed for a code block.
///
/// Returns the smallest number of fence characters (at least 3) that
/// doesn't appear as a run in the content.
pub fn calculate_fence_length(content: &str, fence_char: char) -> usize {
    longest_run(content, fence_char).max(2) + 1
}

/// Calculate the backtick count for inline code: one more than the longest run.
pub fn calculate_inline_code_ticks(content: &str) -> usize {
    longest_run(content, '`') + 1
}

/// Normalize `\r\n` and lone `\r` to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Render raw text as an inline code span.
pub fn inline_code(text: &str) -> String {
    let content = normalize_line_endings(text);
    let fence = "`".repeat(calculate_inline_code_ticks(&content));
    format!("{fence}{content}{fence}")
}

/// Render a fenced code block, including the trailing blank line.
pub fn fenced_block(content: &str, language: &str) -> String {
    let fence = "`".repeat(calculate_fence_length(content, '`'));
    format!("{fence}{language}\n{content}\n{fence}\n\n")
}

/// Escape backslashes and square brackets in link text.
pub fn escape_link_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Escape double quotes in a link or image title.
pub fn escape_title(title: &str) -> String {
    title.replace('"', "\\\"")
}
