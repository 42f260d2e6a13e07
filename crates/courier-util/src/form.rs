//! `application/x-www-form-urlencoded` bodies.
//!
//! Decoding itself is delegated to `url::form_urlencoded`, which never
//! fails. Malformed pairs (bad percent-escapes, `;` separators) are checked
//! up front so they are dropped and reported instead of silently mangled.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::error::{Recovered, UtilityError};

/// Field name to every value it was sent with, in body order.
pub type FormData = BTreeMap<String, Vec<String>>;

/// Parse a form body. Valid pairs are kept even when others are rejected;
/// the first rejection is returned.
pub fn parse_form(body: &[u8]) -> Recovered<FormData> {
    let mut form = FormData::new();
    let mut first_error = None;

    for pair in body.split(|b| *b == b'&') {
        if pair.is_empty() {
            continue;
        }
        if let Err(err) = check_pair(pair) {
            first_error.get_or_insert(err);
            continue;
        }
        for (key, value) in form_urlencoded::parse(pair) {
            form.entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
    }

    match first_error {
        None => Recovered::ok(form),
        Some(err) => Recovered::failed(form, err),
    }
}

fn check_pair(pair: &[u8]) -> Result<(), UtilityError> {
    if pair.contains(&b';') {
        return Err(UtilityError::Form(
            "invalid semicolon separator in form body".to_string(),
        ));
    }
    let mut i = 0;
    while i < pair.len() {
        if pair[i] == b'%' {
            let escape = pair.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                let end = pair.len().min(i + 3);
                return Err(UtilityError::Form(format!(
                    "invalid URL escape {:?}",
                    String::from_utf8_lossy(&pair[i..end])
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn decodes_pairs_and_repeated_keys() {
        let r = parse_form(b"To=%2B15550001111&Body=hello+there&tag=a&tag=b");
        assert!(r.is_clean());
        let form = r.into_value();
        assert_eq!(form["To"], vec!["+15550001111"]);
        assert_eq!(form["Body"], vec!["hello there"]);
        assert_eq!(form["tag"], vec!["a", "b"]);
    }

    #[test]
    fn empty_body_and_bare_keys() {
        assert!(parse_form(b"").into_value().is_empty());
        let form = parse_form(b"flag&&x=").into_value();
        assert_eq!(form["flag"], vec![""]);
        assert_eq!(form["x"], vec![""]);
    }

    #[test]
    fn bad_escape_is_reported_and_skipped() {
        let r = parse_form(b"a=1&b=%zz&c=%4");
        assert_eq!(r.kind(), Some(ErrorKind::Form));
        assert!(r
            .error
            .as_ref()
            .unwrap()
            .to_string()
            .contains("invalid URL escape \"%zz\""));
        assert_eq!(r.value.len(), 1);
        assert_eq!(r.value["a"], vec!["1"]);
    }

    #[test]
    fn semicolon_pairs_are_rejected() {
        let r = parse_form(b"a=1;b=2&c=3");
        assert_eq!(r.kind(), Some(ErrorKind::Form));
        assert!(!r.value.contains_key("a"));
        assert_eq!(r.value["c"], vec!["3"]);
    }
}
