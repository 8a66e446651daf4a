/// Percent-encodes a supplied parameter value for a path. `/` and `\` stay
/// literal so a value may span several segments.
pub fn encode_param(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%2F", "/")
        .replace("%5C", "\\")
}
