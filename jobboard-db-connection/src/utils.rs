use std::borrow::Cow;

/// Redact the credentials portion of a connection URL before it is logged.
pub fn sanitize_database_url(raw: &str) -> Cow<'_, str> {
    let Some(scheme_end) = raw.find("://") else {
        // sqlite:path and bare file paths carry no credentials
        return Cow::Borrowed(raw);
    };
    let rest = &raw[scheme_end + 3..];

    let host_end = rest.find('/').unwrap_or(rest.len());
    let authority = &rest[..host_end];

    if let Some(at_pos) = authority.rfind('@') {
        let scheme = &raw[..scheme_end + 3];
        let host_and_rest = &rest[at_pos + 1..];
        let mut result = String::with_capacity(scheme.len() + 10 + host_and_rest.len());
        result.push_str(scheme);
        result.push_str("****:****@");
        result.push_str(host_and_rest);
        Cow::Owned(result)
    } else {
        Cow::Borrowed(raw)
    }
}
