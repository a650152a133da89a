//! Helpers for the `QDocRoot` XML envelope every CGI endpoint answers with.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;

use super::error::ErrorKind;

/// The success sentinel of the `authPassed` element.
pub const AUTH_PASSED: i64 = 1;

/// Deserialize a full response body into a typed document.
pub fn decode_document<D: DeserializeOwned>(body: &str) -> Result<D, ErrorKind> {
    Ok(quick_xml::de::from_str(body)?)
}

/// Reject the document unless the server reported `authPassed == 1`.
pub fn ensure_auth_passed(auth_passed: i64, rejected: ErrorKind) -> Result<(), ErrorKind> {
    if auth_passed == AUTH_PASSED {
        Ok(())
    } else {
        Err(rejected)
    }
}

/// The firmware emits the literal string `null` for unset values.
pub fn filter_null(value: String) -> String {
    if value.eq_ignore_ascii_case("null") {
        String::new()
    } else {
        value
    }
}

/// Integer element reader: whitespace is trimmed and an empty element is 0.
pub fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| D::Error::custom(format!("invalid integer value {:?}", trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename = "QDocRoot")]
    struct Doc {
        #[serde(rename = "authPassed", deserialize_with = "lenient_int", default)]
        auth_passed: i64,
        #[serde(default)]
        name: String,
    }

    #[test]
    fn reads_cdata_text() {
        let doc: Doc = decode_document(
            concat!(
                "<QDocRoot><authPassed><![CDATA[1]]></authPassed>",
                "<name><![CDATA[pkgA]]></name></QDocRoot>",
            ),
        )
        .unwrap();
        assert_eq!(doc.auth_passed, 1);
        assert_eq!(doc.name, "pkgA");
    }

    #[test]
    fn empty_and_missing_integers_read_as_zero() {
        let doc: Doc = decode_document("<QDocRoot><authPassed></authPassed></QDocRoot>").unwrap();
        assert_eq!(doc.auth_passed, 0);

        let doc: Doc = decode_document("<QDocRoot><name>x</name></QDocRoot>").unwrap();
        assert_eq!(doc.auth_passed, 0);
    }

    #[test]
    fn non_numeric_integer_is_a_parse_error() {
        let err = decode_document::<Doc>("<QDocRoot><authPassed>yes</authPassed></QDocRoot>")
            .unwrap_err();
        assert!(matches!(err, ErrorKind::ResponseParse(_)));
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let err = decode_document::<Doc>("<QDocRoot><authPassed>1</QDocRoot>").unwrap_err();
        assert!(matches!(err, ErrorKind::ResponseParse(_)));
    }

    #[test]
    fn auth_check_uses_given_rejection() {
        assert!(ensure_auth_passed(1, ErrorKind::AuthFailed).is_ok());
        assert!(matches!(
            ensure_auth_passed(0, ErrorKind::LoginFailed),
            Err(ErrorKind::LoginFailed)
        ));
        assert!(matches!(
            ensure_auth_passed(2, ErrorKind::LogoutFailed),
            Err(ErrorKind::LogoutFailed)
        ));
    }

    #[test]
    fn filters_null_in_any_case() {
        assert_eq!(filter_null("null".into()), "");
        assert_eq!(filter_null("NULL".into()), "");
        assert_eq!(filter_null("Null".into()), "");
        assert_eq!(filter_null("nullable".into()), "nullable");
        assert_eq!(filter_null("/share/CACHEDEV1_DATA".into()), "/share/CACHEDEV1_DATA");
    }
}
