use indexmap::IndexMap;

/// Insertion-ordered header map.
///
/// Re-inserting a key keeps its original position and hands back the value
/// it replaced.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    entries: IndexMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or overwrites `key`.
    ///
    /// # Returns
    ///
    /// The previous value when `key` was already present, `None` otherwise.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl PartialEq for Headers {
    /// Equal only when the same pairs appear in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for Headers {}

/// A parsed request line plus its headers.
///
/// Method and version are kept verbatim; nothing checks them against a list
/// of known values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The request method, e.g. "GET"
    pub method: String,
    /// The request path, e.g. "/index.html"
    pub path: String,
    /// Protocol version, e.g. "HTTP/1.1"
    pub version: String,
    /// Request headers in the order they arrived
    pub headers: Headers,
}

impl Request {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            version: version.into(),
            headers: Headers::new(),
        }
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }
}
