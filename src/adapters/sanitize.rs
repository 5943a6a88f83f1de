//! Log sanitization for credentials and session material.
//!
//! Applied to every formatted log line before it reaches the sink:
//! - passwords in JSON bodies or `key=value` pairs
//! - Flask session cookies and `Set-Cookie`/`Cookie` headers
//! - bearer tokens
//! - e-mail addresses (often used as usernames)
//!
//! Structured logging should keep these values out of log calls in the first
//! place (`Credentials` redacts its own `Debug`); this is the fallback.
//!
//! Input is capped at `HEARTGUARD_SANITIZE_MAX_BYTES` (default 16 KiB).

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PATTERNS: OnceLock<RedactionPatterns> = OnceLock::new();

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct Redaction {
    regex: Regex,
    replacement: &'static str,
}

struct RedactionPatterns {
    set: RegexSet,
    rules: Vec<Redaction>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var("HEARTGUARD_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn patterns() -> &'static RedactionPatterns {
    PATTERNS.get_or_init(|| {
        let rules: Vec<(&'static str, &'static str)> = vec![
            // "password": "..." in JSON bodies
            (
                r#"(?i)"(?:password|pass|passwd)"\s*:\s*"(?:[^"\\]|\\.)*""#,
                r#""password":"[REDACTED]""#,
            ),
            // password=... in query strings or key/value logs
            (
                r"(?i)\b(?:password|passwd|pwd)\s*[=:]\s*[^\s&,;]+",
                "password=[REDACTED]",
            ),
            // Flask session cookie
            (r"\bsession=[A-Za-z0-9._\-]+", "session=[REDACTED-SESSION]"),
            // Raw cookie headers
            (r"(?i)\b(?:set-)?cookie:\s*[^\r\n]+", "cookie: [REDACTED-COOKIE]"),
            // Bearer tokens
            (r"(?i)\bbearer\s+[A-Za-z0-9._~+/\-]+=*", "Bearer [REDACTED-TOKEN]"),
            // E-mail addresses
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let rules = rules
            .into_iter()
            .map(|(pattern, replacement)| Redaction {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        RedactionPatterns { set, rules }
    })
}

/// Redact credentials and session material from `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let rule = &patterns.rules[idx];
        result = rule.regex.replace_all(&result, rule.replacement).to_string();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// Whether `input` contains anything `sanitize` would redact.
#[must_use]
pub fn contains_secret(input: &str) -> bool {
    let (prefix, _) = truncate_to_char_boundary(input, max_sanitize_bytes());
    patterns().set.is_match(prefix)
}

/// A `tracing_subscriber` writer wrapper that sanitizes each formatted line
/// before it reaches the underlying sink.
#[derive(Debug)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M> Clone for SanitizingMakeWriter<M>
where
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A single line longer than twice the cap is flushed as-is (truncated).
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if self.buffer.len() > hard_cap {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
        }
        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_json_password() {
        let input = r#"body={"username":"sam","password":"hunter2"}"#;
        let sanitized = sanitize(input);
        assert!(!sanitized.contains("hunter2"));
        assert!(sanitized.contains("[REDACTED]"));
        assert!(sanitized.contains("sam"));
    }

    #[test]
    fn test_key_value_password() {
        let sanitized = sanitize("login attempt password=hunter2 user=sam");
        assert!(!sanitized.contains("hunter2"));
    }

    #[test]
    fn test_session_cookie() {
        let sanitized = sanitize("cookie jar: session=eyJsb2dnZWRfaW4iOnRydWV9.ZxYz.abc-123");
        assert!(!sanitized.contains("eyJsb2dnZWRfaW4"));
    }

    #[test]
    fn test_bearer_and_email() {
        let sanitized = sanitize("Authorization: Bearer abc.def.ghi for sam@example.com");
        assert!(sanitized.contains("[REDACTED-TOKEN]"));
        assert!(sanitized.contains("[REDACTED-EMAIL]"));
    }

    #[test]
    fn test_plain_text_untouched() {
        let input = "History loaded rows=12";
        assert_eq!(sanitize(input), input);
        assert!(!contains_secret(input));
        assert!(contains_secret("password: x"));
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        let sanitized = sanitize_with_limit("héllo wörld", 2);
        assert!(sanitized.ends_with("[TRUNCATED]"));
        assert!(sanitized.starts_with('h'));
    }

    #[test]
    fn test_writer_sanitizes_per_line() {
        let mut out = Vec::new();
        {
            let mut writer = SanitizingWriter::new(&mut out);
            writer
                .write_all(b"first password=abc\nsecond line\npartial ")
                .expect("write");
            writer.write_all(b"password=xyz").expect("write");
            writer.flush().expect("flush");
        }
        let text = String::from_utf8(out).expect("utf8");
        assert!(!text.contains("abc"));
        assert!(!text.contains("xyz"));
        assert!(text.contains("second line\n"));
    }
}
