//! Comment stripping.

/// Cut a physical line at its first unescaped comment marker.
///
/// `;` and `#` start a comment unless the character right before them is a
/// backslash. The escape is left in place; it only prevents the cut.
///
/// ```rust
/// use quire::sanitize_line;
///
/// assert_eq!(sanitize_line("key = value ; note"), "key = value ");
/// assert_eq!(sanitize_line(r"color = \#fff # white"), r"color = \#fff ");
/// assert_eq!(sanitize_line("plain"), "plain");
/// ```
pub fn sanitize_line(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if (b == b';' || b == b'#') && (i == 0 || bytes[i - 1] != b'\\') {
            return &line[..i];
        }
    }
    line
}
