/*!
Trillium handler for HTTP Strict Transport Security.

This crate sets a
[`Strict-Transport-Security`](https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Strict-Transport-Security)
header on every response, telling browsers to only reach this host
over https for the configured duration.

* [`Hsts`] is the handler. Place it early in a tuple of handlers, or
  give it an inner handler to run with [`Hsts::with_handler`] or [`wrap`].
* [`HstsPolicy`] holds the `max-age` and `includeSubDomains` settings.

```
# use trillium_testing::prelude::*;
# use trillium_hsts::Hsts;
let app = (Hsts::new(), "ok");
assert_ok!(
    get("/").on(&app),
    "ok",
    "strict-transport-security" => "max-age=31536000; includeSubDomains"
);
```
*/
#![forbid(unsafe_code)]
#![deny(
    missing_copy_implementations,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    unused_qualifications
)]

mod policy;
pub use policy::HstsPolicy;

use std::borrow::Cow;
use trillium::{
    async_trait, Conn, Handler, Info, KnownHeaderName::StrictTransportSecurity, Upgrade,
};

/**
Trillium handler that sets a `Strict-Transport-Security` response
header.

The header value is rendered once from an [`HstsPolicy`] when the
handler is built. Any `Strict-Transport-Security` value already on
the response is replaced, so exactly one value is sent.

An optional inner handler runs after the header is set, and the
rest of the handler lifecycle (`init`, `before_send`, upgrades) is
forwarded to it.
*/
#[derive(Debug)]
pub struct Hsts<H = Box<dyn Handler>> {
    policy: HstsPolicy,
    header_value: String,
    handler: Option<H>,
}

impl Default for Hsts {
    fn default() -> Self {
        HstsPolicy::default().into()
    }
}

/**
Builds an Hsts handler with no inner handler from a policy.

```
# use trillium_testing::prelude::*;
# use trillium_hsts::{Hsts, HstsPolicy};
let app = (
    Hsts::from(HstsPolicy::new().with_max_age(60).without_subdomains()),
    "ok"
);

assert_headers!(get("/").on(&app), "strict-transport-security" => "max-age=60");
```
*/
impl From<HstsPolicy> for Hsts {
    fn from(policy: HstsPolicy) -> Self {
        Self {
            policy,
            header_value: policy.header_value(),
            handler: None,
        }
    }
}

impl Hsts {
    /**
    Constructs a new Hsts handler with the default [`HstsPolicy`]:
    a one year `max-age` that includes subdomains.

    ```
    # use trillium_testing::prelude::*;
    # use trillium_hsts::{Hsts, HstsPolicy};
    let handler = Hsts::new();
    assert_eq!(handler.policy(), HstsPolicy::new());

    let app = (handler, "ok");
    assert_headers!(
        get("/").on(&app),
        "strict-transport-security" => "max-age=31536000; includeSubDomains"
    );
    ```
    */
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: Handler> Hsts<H> {
    /**
    Sets an inner handler that runs on every conn immediately after
    the header has been set. This replaces any previous inner
    handler.

    ```
    # use trillium_testing::prelude::*;
    # use trillium_hsts::Hsts;
    let app = Hsts::new().with_handler(|conn: Conn| async move { conn.ok("inner") });
    assert_ok!(
        get("/").on(&app),
        "inner",
        "strict-transport-security" => "max-age=31536000; includeSubDomains"
    );
    ```
    */
    pub fn with_handler<Inner: Handler>(self, handler: Inner) -> Hsts<Inner> {
        Hsts {
            policy: self.policy,
            header_value: self.header_value,
            handler: Some(handler),
        }
    }

    /// the policy this handler was built with
    pub fn policy(&self) -> HstsPolicy {
        self.policy
    }

    /// the rendered `Strict-Transport-Security` header value
    pub fn header_value(&self) -> &str {
        &self.header_value
    }

    /// borrows the inner handler, if there is one
    pub fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }
}

#[async_trait]
impl<H: Handler> Handler for Hsts<H> {
    async fn run(&self, mut conn: Conn) -> Conn {
        let headers = conn.inner_mut().response_headers_mut();
        if let Some(previous) = headers.get_str(StrictTransportSecurity) {
            log::trace!(
                "replacing strict-transport-security {:?} with {:?}",
                previous,
                self.header_value
            );
        }
        headers.insert(StrictTransportSecurity, self.header_value.clone());

        match &self.handler {
            Some(handler) => handler.run(conn).await,
            None => conn,
        }
    }

    async fn init(&mut self, info: &mut Info) {
        log::debug!("sending strict-transport-security: {}", self.header_value);
        if let Some(handler) = &mut self.handler {
            handler.init(info).await;
        }
    }

    async fn before_send(&self, conn: Conn) -> Conn {
        match &self.handler {
            Some(handler) => handler.before_send(conn).await,
            None => conn,
        }
    }

    fn has_upgrade(&self, upgrade: &Upgrade) -> bool {
        self.handler
            .as_ref()
            .map_or(false, |handler| handler.has_upgrade(upgrade))
    }

    async fn upgrade(&self, upgrade: Upgrade) {
        if let Some(handler) = &self.handler {
            handler.upgrade(upgrade).await;
        }
    }

    fn name(&self) -> Cow<'static, str> {
        match &self.handler {
            Some(handler) => format!("Hsts({})", handler.name()).into(),
            None => "Hsts".into(),
        }
    }
}

/**
Builds an [`Hsts`] handler from a policy and an optional inner
handler.

```
# use trillium_testing::prelude::*;
# use trillium_hsts::{wrap, HstsPolicy};
let app = wrap(HstsPolicy::new().with_max_age(1), Some("ok"));
assert_ok!(get("/").on(&app), "ok", "strict-transport-security" => "max-age=1; includeSubDomains");
```
*/
pub fn wrap<H: Handler>(policy: HstsPolicy, handler: Option<H>) -> Hsts<H> {
    Hsts {
        policy,
        header_value: policy.header_value(),
        handler,
    }
}

/// Alias for [`Hsts::new`]
pub fn hsts() -> Hsts {
    Hsts::new()
}
