#[inline]
pub fn clip_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[inline]
pub fn clip_for_log(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", clip_chars(s, max_chars))
    } else {
        s.to_string()
    }
}
