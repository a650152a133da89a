use reqwest::Method;
use url::Url;

/// Parameters of one CGI call, before it is resolved against a base URI.
#[derive(Debug, Clone)]
pub(crate) struct RequestSpec {
    pub method: Method,
    pub path: &'static str,
    pub query: Vec<(&'static str, String)>,
    pub form: Vec<(&'static str, String)>,
}

impl RequestSpec {
    pub fn get() -> Self {
        Self::with_method(Method::GET)
    }

    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    fn with_method(method: Method) -> Self {
        Self {
            method,
            path: "",
            query: Vec::new(),
            form: Vec::new(),
        }
    }

    /// Suffix appended verbatim to the service base URI.
    pub fn path(mut self, path: &'static str) -> Self {
        self.path = path;
        self
    }

    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn form(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.form.push((key, value.into()));
        self
    }
}

/// A fully resolved request, ready for a [`Transport`](super::Transport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    /// `application/x-www-form-urlencoded` body, empty for bodiless requests.
    pub form: Vec<(String, String)>,
}

impl PreparedRequest {
    pub fn encoded_form(&self) -> Option<String> {
        if self.form.is_empty() {
            return None;
        }
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.form {
            serializer.append_pair(key, value);
        }
        Some(serializer.finish())
    }

    pub fn query_value(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    pub fn form_value(&self, key: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
