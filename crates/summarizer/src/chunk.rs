/// Characters of source text per summarisation call
pub const DEFAULT_CHUNK_CHARS: usize = 120_000;

/// Split plain tafsir text into chunks of at most `max_chars` characters.
///
/// Splits only on verse boundaries (blank lines) so entries stay intact. An
/// entry longer than `max_chars` becomes a chunk of its own.
pub fn chunk_text(plain_text: &str, max_chars: usize) -> Vec<String> {
    if plain_text.chars().count() <= max_chars {
        return vec![plain_text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for entry in plain_text.split("\n\n") {
        // +2 for the separator re-inserted on join
        let entry_len = entry.chars().count() + 2;
        if current_len + entry_len > max_chars && !current.is_empty() {
            chunks.push(current.join("\n\n"));
            current.clear();
            current_len = 0;
        }
        current.push(entry);
        current_len += entry_len;
    }

    if !current.is_empty() {
        chunks.push(current.join("\n\n"));
    }

    chunks
}
