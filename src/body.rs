use std::{fmt::Debug, sync::Arc};

use futures::{FutureExt, future::BoxFuture};

/// Future returned by a single invocation of a [`Body`].
pub type BodyFuture = BoxFuture<'static, BodyResult>;

/// An async-capable callable used as a spec body or a hook body.
///
/// A body may be invoked more than once (retries), so it is stored as a
/// shared `Fn` that produces a fresh future per call.
/// Cloning a body is cheap and yields a handle to the same callable.
#[derive(Clone)]
pub struct Body(Arc<dyn Fn() -> BodyFuture + Send + Sync>);

impl Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Body(...)")
    }
}

impl Body {
    pub fn new<F, Fut, T>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<BodyResult> + 'static,
    {
        Self(Arc::new(move || {
            f().map(<T as Into<BodyResult>>::into).boxed()
        }))
    }

    pub fn call(&self) -> BodyFuture {
        (self.0)()
    }
}

/// Result of one body invocation.
///
/// Bodies may return `()` or any `Result<(), E>` where `E` converts into
/// [`anyhow::Error`], the original error stays downcastable.
#[derive(Debug)]
pub struct BodyResult(pub Result<(), anyhow::Error>);

impl From<()> for BodyResult {
    fn from(_: ()) -> Self {
        Self(Ok(()))
    }
}

impl<E: Into<anyhow::Error>> From<Result<(), E>> for BodyResult {
    fn from(v: Result<(), E>) -> Self {
        BodyResult(v.map_err(Into::into))
    }
}
