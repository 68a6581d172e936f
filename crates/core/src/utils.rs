use uuid::Uuid;

pub fn generate_short_id(len: usize) -> String {
    Uuid::new_v4()
        .to_string()
        .replace('-', "")
        .chars()
        .take(len)
        .collect()
}

/// True when the input is absent in practice: empty or only whitespace.
#[inline]
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}
