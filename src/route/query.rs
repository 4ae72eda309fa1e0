use super::Router;
use tokio::sync::watch;
use url::Url;

/// Coerce a raw query value into a positive page number.
///
/// Missing or non-numeric values fall back to `default`. Numeric values below
/// one are clamped to one and values beyond `u32::MAX` saturate.
pub fn coerce_page(raw: Option<&str>, default: u32) -> u32 {
    let default = default.max(1);
    match raw.map(|value| value.trim().parse::<i64>()) {
        Some(Ok(value)) if value < 1 => 1,
        Some(Ok(value)) => u32::try_from(value).unwrap_or(u32::MAX),
        Some(Err(_)) | None => default,
    }
}

pub(crate) fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Return a copy of the URL with the query parameter set, keeping the order
/// of the other parameters.
pub(crate) fn with_query_value(url: &Url, key: &str, value: &str) -> Url {
    let mut found = false;
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter_map(|(k, v)| {
            if k != key {
                return Some((k.into_owned(), v.into_owned()));
            }
            if found {
                return None;
            }
            found = true;
            Some((k.into_owned(), value.to_owned()))
        })
        .collect();

    let mut next = url.clone();
    {
        let mut serializer = next.query_pairs_mut();
        serializer.clear();
        for (k, v) in &pairs {
            serializer.append_pair(k, v);
        }
        if !found {
            serializer.append_pair(key, value);
        }
    }
    next
}

/// A positive integer bound to a named query parameter of the current
/// location.
///
#[derive(Clone)]
pub struct RouteQuery {
    router: Router,
    key: String,
    default: u32,
}

impl RouteQuery {
    pub fn new(router: Router, key: &str, default: u32) -> Self {
        RouteQuery {
            router,
            key: key.to_owned(),
            default: default.max(1),
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Return the coerced value of the parameter.
    ///
    pub fn get(&self) -> u32 {
        coerce_page(self.router.query(&self.key).as_deref(), self.default)
    }

    /// Write the value to the current location without navigating. Values
    /// below one are stored as one.
    ///
    pub fn set(&self, value: u32) {
        self.router
            .replace_query(&self.key, &value.max(1).to_string());
    }

    /// Observe changes of the coerced value.
    ///
    pub fn watch(&self) -> QueryWatch {
        let receiver = self.router.subscribe();
        QueryWatch {
            last: self.get(),
            receiver,
            key: self.key.to_owned(),
            default: self.default,
        }
    }
}

/// Yields the parameter's value each time a location change alters it.
///
pub struct QueryWatch {
    receiver: watch::Receiver<Url>,
    key: String,
    default: u32,
    last: u32,
}

impl QueryWatch {
    /// Return the value last observed.
    ///
    pub fn current(&self) -> u32 {
        self.last
    }

    /// Wait for the next change of the value. Location changes that leave it
    /// unchanged are skipped. Returns `None` once the router is dropped.
    ///
    pub async fn changed(&mut self) -> Option<u32> {
        loop {
            self.receiver.changed().await.ok()?;
            let value = {
                let location = self.receiver.borrow_and_update();
                coerce_page(query_value(&location, &self.key).as_deref(), self.default)
            };
            if value != self.last {
                self.last = value;
                return Some(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn page_query(location: &str) -> RouteQuery {
        RouteQuery::new(Router::parse(location).unwrap(), "page", 1)
    }

    #[test]
    fn coerce_valid_values() {
        assert_eq!(1, coerce_page(Some("1"), 1));
        assert_eq!(42, coerce_page(Some(" 42 "), 1));
        assert_eq!(u32::MAX, coerce_page(Some("99999999999"), 1));
    }

    #[test]
    fn coerce_clamps_and_falls_back() {
        assert_eq!(1, coerce_page(None, 1));
        assert_eq!(3, coerce_page(None, 3));
        assert_eq!(1, coerce_page(Some("0"), 3));
        assert_eq!(1, coerce_page(Some("-5"), 3));
        assert_eq!(3, coerce_page(Some("abc"), 3));
        assert_eq!(3, coerce_page(Some(""), 3));
        assert_eq!(1, coerce_page(Some("abc"), 0));
    }

    #[test]
    fn get_reads_current_location() {
        assert_eq!(5, page_query("http://localhost/projects?page=5").get());
        assert_eq!(1, page_query("http://localhost/projects").get());
        assert_eq!(1, page_query("http://localhost/projects?page=oops").get());
    }

    #[test]
    fn set_writes_location() {
        let query = page_query("http://localhost/projects?page=1");
        query.set(3);
        assert_eq!(3, query.get());
        assert_eq!(Some("3".to_string()), query.router().query("page"));

        query.set(0);
        assert_eq!(Some("1".to_string()), query.router().query("page"));
    }

    #[test]
    fn set_adds_missing_parameter() {
        let query = page_query("http://localhost/projects?q=x");
        query.set(2);
        assert_eq!(
            "http://localhost/projects?q=x&page=2",
            query.router().current().as_str()
        );
    }

    #[tokio::test]
    async fn watch_yields_changed_values() {
        let query = page_query("http://localhost/projects?page=1");
        let mut watch = query.watch();
        assert_eq!(1, watch.current());

        query.set(2);
        assert_eq!(Some(2), watch.changed().await);

        query.router().navigate("?page=7").unwrap();
        assert_eq!(Some(7), watch.changed().await);

        query.router().back();
        assert_eq!(Some(2), watch.changed().await);
    }

    #[tokio::test]
    async fn watch_skips_unrelated_changes() {
        let query = page_query("http://localhost/projects?page=1");
        let mut watch = query.watch();

        query.router().navigate("?page=1&sort=name").unwrap();
        let waited = tokio::time::timeout(Duration::from_millis(50), watch.changed()).await;
        assert!(waited.is_err());

        query.set(4);
        assert_eq!(Some(4), watch.changed().await);
    }
}
