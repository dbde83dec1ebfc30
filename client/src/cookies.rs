/// Look up a cookie by name in a `document.cookie` style string
/// (`"name=value; other=value"`). Values are URL-decoded; an absent name
/// yields `None`.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }

    for pair in cookies.split("; ") {
        if let Some(value) = pair.strip_prefix(name).and_then(|rest| rest.strip_prefix('=')) {
            return Some(
                urlencoding::decode(value)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| value.to_string()),
            );
        }
    }
    None
}
