/// Longest last name shown as-is in a grid cell.
pub const MAX_LAST_NAME_CHARS: usize = 7;

/// Pick the label shown in an employee's grid cell.
///
/// Long last names fall back to the nickname, or get cut to
/// [`MAX_LAST_NAME_CHARS`] characters when there is none.
pub fn format_name(last_name: Option<&str>, nick_name: Option<&str>) -> String {
    let nick = nick_name.filter(|n| !n.is_empty());
    match last_name {
        None | Some("") => nick.unwrap_or_default().to_string(),
        Some(last) if last.chars().count() > MAX_LAST_NAME_CHARS => match nick {
            Some(n) => n.to_string(),
            None => last.chars().take(MAX_LAST_NAME_CHARS).collect(),
        },
        Some(last) => last.to_string(),
    }
}
