//! Token-driven pagination over remote listing calls
//!
//! AWS list operations return one page of items plus an opaque continuation
//! token. [`fetch_all`] follows the token until the service stops returning
//! one and hands back every item in response order.

use std::future::Future;

use tracing::trace;

/// One page of a listing response
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self { items, next_token }
    }

    /// A page with no continuation token
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    /// The token to pass to the next call, if there is one.
    ///
    /// Some services signal the end with an empty string rather than omitting
    /// the token.
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// A remote listing operation with its request parameters already bound.
///
/// Each call fetches one page; `token` is `None` for the first page.
pub trait ListingCapability: Send + Sync {
    type Item: Send;
    type Error: Send;

    fn list_page(
        &self,
        token: Option<String>,
    ) -> impl Future<Output = Result<Page<Self::Item>, Self::Error>> + Send;
}

/// Adapts a closure into a [`ListingCapability`]. See [`listing_fn`].
#[derive(Clone)]
pub struct ListingFn<F>(F);

/// Wrap a closure taking the continuation token as a listing capability.
///
/// ```rust,ignore
/// let stacks = fetch_all(&listing_fn(move |token| client.list_stacks(token))).await?;
/// ```
pub fn listing_fn<F, Fut, T, E>(f: F) -> ListingFn<F>
where
    F: Fn(Option<String>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page<T>, E>> + Send,
{
    ListingFn(f)
}

impl<F, Fut, T, E> ListingCapability for ListingFn<F>
where
    F: Fn(Option<String>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page<T>, E>> + Send,
    T: Send,
    E: Send,
{
    type Item = T;
    type Error = E;

    fn list_page(&self, token: Option<String>) -> impl Future<Output = Result<Page<T>, E>> + Send {
        (self.0)(token)
    }
}

/// Fetch every page of a listing and concatenate the items in order.
///
/// Stops when a page carries no token or an empty one. There is no page cap.
/// The first failing call aborts the whole fetch; pages already fetched are
/// discarded.
///
/// ```
/// use fis_mcp_core::{fetch_all, listing_fn, Page};
///
/// # tokio_test::block_on(async {
/// let listing = listing_fn(|token: Option<String>| async move {
///     Ok::<_, String>(match token.as_deref() {
///         None => Page::new(vec!["a", "b"], Some("t1".to_string())),
///         Some("t1") => Page::last(vec!["c"]),
///         Some(other) => return Err(format!("unexpected token {}", other)),
///     })
/// });
/// assert_eq!(fetch_all(&listing).await.unwrap(), vec!["a", "b", "c"]);
/// # });
/// ```
pub async fn fetch_all<L>(listing: &L) -> Result<Vec<L::Item>, L::Error>
where
    L: ListingCapability,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = listing.list_page(token.take()).await?;
        pages += 1;
        trace!(
            page = pages,
            items = page.items.len(),
            more = page.continuation().is_some(),
            "fetched listing page"
        );

        token = page.continuation().map(str::to_owned);
        items.extend(page.items);

        if token.is_none() {
            break;
        }
    }

    Ok(items)
}
