/// Breaks `text` in two, `index` characters before its end.
///
/// Used for tokens whose tail should sit on its own line, e.g. the checksum
/// part of an address.
///
/// # Panics
///
/// If `index` is larger than the number of characters in `text`.
pub fn split_at_tail(text: &str, index: usize) -> String {
    let len = text.chars().count();
    assert!(
        index <= len,
        "tail of {} characters requested from a {} character string",
        index,
        len
    );

    let at = text
        .char_indices()
        .nth(len - index)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let (first, second) = text.split_at(at);
    format!("{} {}", first, second)
}
