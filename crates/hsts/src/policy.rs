use std::{
    fmt::{self, Display, Formatter},
    time::Duration,
};

const ONE_YEAR: i64 = 31_536_000;

/**
The configuration for a [`Hsts`](crate::Hsts) handler.

A policy is a small `Copy` value. Build one, adjust it with the
chainable `with_*` methods, and hand it to the handler, which keeps
its own frozen copy.

```
# use trillium_hsts::HstsPolicy;
let policy = HstsPolicy::new();
assert_eq!(policy.max_age(), 31536000);
assert!(policy.include_subdomains());
assert_eq!(policy.to_string(), "max-age=31536000; includeSubDomains");

let policy = HstsPolicy::new().with_max_age(1).without_subdomains();
assert_eq!(policy.to_string(), "max-age=1");
```
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HstsPolicy {
    max_age: i64,
    include_subdomains: bool,
}

impl Default for HstsPolicy {
    fn default() -> Self {
        Self {
            max_age: ONE_YEAR,
            include_subdomains: true,
        }
    }
}

impl HstsPolicy {
    /// constructs a policy with a one year `max-age` that includes subdomains
    pub fn new() -> Self {
        Self::default()
    }

    /// the number of seconds clients should treat this host as https-only
    pub fn max_age(&self) -> i64 {
        self.max_age
    }

    /// whether this policy also applies to all subdomains
    pub fn include_subdomains(&self) -> bool {
        self.include_subdomains
    }

    /**
    Sets the `max-age` directive, in seconds.

    The value is not validated. Zero and negative values are sent
    exactly as provided.
    */
    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = seconds;
        self
    }

    /// Sets the `max-age` directive from a [`Duration`]. Fractional
    /// seconds are dropped.
    pub fn with_max_age_duration(self, max_age: Duration) -> Self {
        self.with_max_age(i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX))
    }

    /// chainable setter for the `includeSubDomains` directive
    pub fn with_include_subdomains(mut self, include_subdomains: bool) -> Self {
        self.include_subdomains = include_subdomains;
        self
    }

    /// omits the `includeSubDomains` directive
    pub fn without_subdomains(self) -> Self {
        self.with_include_subdomains(false)
    }

    /// renders this policy as a `Strict-Transport-Security` header value
    pub fn header_value(&self) -> String {
        self.to_string()
    }
}

impl Display for HstsPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "max-age={}", self.max_age)?;
        if self.include_subdomains {
            f.write_str("; includeSubDomains")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let policy = HstsPolicy::new();
        assert_eq!(policy.max_age(), 31536000);
        assert!(policy.include_subdomains());
        assert_eq!(policy, HstsPolicy::default());
    }

    #[test]
    fn header_values() {
        assert_eq!(
            HstsPolicy::new().header_value(),
            "max-age=31536000; includeSubDomains"
        );
        assert_eq!(
            HstsPolicy::new().with_max_age(1).header_value(),
            "max-age=1; includeSubDomains"
        );
        assert_eq!(
            HstsPolicy::new().without_subdomains().header_value(),
            "max-age=31536000"
        );
        assert_eq!(
            HstsPolicy::new()
                .with_max_age(1)
                .with_include_subdomains(false)
                .header_value(),
            "max-age=1"
        );
    }

    #[test]
    fn unvalidated_max_age() {
        assert_eq!(
            HstsPolicy::new().with_max_age(0).header_value(),
            "max-age=0; includeSubDomains"
        );
        assert_eq!(
            HstsPolicy::new()
                .with_max_age(-300)
                .without_subdomains()
                .header_value(),
            "max-age=-300"
        );
    }

    #[test]
    fn duration() {
        let policy = HstsPolicy::new().with_max_age_duration(Duration::from_millis(90_500));
        assert_eq!(policy.max_age(), 90);

        let policy = HstsPolicy::new().with_max_age_duration(Duration::MAX);
        assert_eq!(policy.max_age(), i64::MAX);
    }
}
