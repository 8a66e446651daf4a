use memchr::memmem;

/// Strips every leading and trailing `/` from an incoming request path.
#[inline]
pub fn trim_request_path(path: &str) -> &str {
    path.trim_matches('/')
}

/// Collapses runs of `/` and drops leading and trailing separators from a
/// reverse-built path.
#[tracing::instrument(level = "trace", fields(path_len=path.len() as u64))]
pub fn tidy_built_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if memmem::find(trimmed.as_bytes(), b"//").is_none() {
        return trimmed.to_string();
    }

    let mut output = String::with_capacity(trimmed.len());
    let mut prev_was_slash = false;
    for ch in trimmed.chars() {
        if ch == '/' {
            if prev_was_slash {
                continue;
            }
            prev_was_slash = true;
        } else {
            prev_was_slash = false;
        }
        output.push(ch);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_request_path_on_both_ends() {
        assert_eq!(trim_request_path("/users/edit/"), "users/edit");
        assert_eq!(trim_request_path("//"), "");
        assert_eq!(trim_request_path(""), "");
    }

    #[test]
    fn collapses_duplicate_separators() {
        assert_eq!(tidy_built_path("api//const///2/"), "api/const/2");
        assert_eq!(tidy_built_path("welcome"), "welcome");
        assert_eq!(tidy_built_path("/news/"), "news");
        assert_eq!(tidy_built_path("/"), "");
    }
}
