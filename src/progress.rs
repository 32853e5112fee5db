// Progress predicates over the input buffer and the current target word.
// Both are total: any buffer content yields an answer.

/// The trimmed buffer is a (possibly empty) prefix of the target.
pub fn is_correct_so_far(target: &str, buffer: &str) -> bool {
    let buffer = buffer.trim();
    buffer.is_empty() || target.starts_with(buffer)
}

/// The trimmed buffer spells the target exactly. An empty target is
/// complete as soon as the buffer holds nothing but whitespace.
pub fn can_move_to_next_word(target: &str, buffer: &str) -> bool {
    buffer.trim() == target
}
