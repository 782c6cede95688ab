/// Convert a `snake_case` model name into the remote table name.
///
/// Every underscore followed by a word character is dropped and the character upper-cased, then
/// the first character is upper-cased: `sso_customer` becomes `SsoCustomer`. Names that are
/// already in table form are returned unchanged.
pub fn normalize_model_name(name: &str) -> String {
    let mut table = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == '_' && is_word_char(next) => {
                table.extend(next.to_uppercase());
                chars.next();
            }
            _ => table.push(c),
        }
    }

    let mut chars = table.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => table,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
