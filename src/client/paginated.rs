//! Lazily paginated lists over Up collection endpoints.
//!
//! A listing call fetches the first page itself and hands it to a
//! [`PaginatedList`] (blocking) or [`AsyncPaginatedList`] (async). From then
//! on the list fetches further pages only when an access needs them, so
//! reading the first few transactions of an account never downloads its
//! whole history.
//!
//! Both variants honour an optional `limit`: the list never holds more than
//! `limit` elements, no matter how large the server's pages are.
//!
//! # Example
//!
//! ```no_run
//! use futures_util::TryStreamExt;
//! use up_bank::api::TransactionsQuery;
//!
//! # async fn example(client: up_bank::UpClient) -> up_bank::Result<()> {
//! let mut transactions = client
//!     .transactions()
//!     .list(TransactionsQuery::default().limit(50))
//!     .await?;
//!
//! // Random access fetches pages up to the requested index.
//! let tenth = transactions.get(9).await?;
//! println!("{}", tenth.description);
//!
//! // Streaming starts over from the elements already fetched.
//! let all: Vec<_> = transactions.stream().try_collect().await?;
//! assert!(all.len() <= 50);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::ops::{Bound, RangeBounds};

use futures_util::stream::{self, Stream};

use super::transport::{strip_base_url, AsyncTransport, Factory, RawPage, Transport};
use crate::{Error, Result};

/// Elements fetched so far plus the cursor to the next page.
///
/// Holds the bookkeeping shared by both list variants. Only the act of
/// fetching a page differs between them.
#[derive(Debug, Clone)]
struct PageBuffer<T> {
    elements: Vec<T>,
    next_cursor: Option<String>,
    limit: Option<usize>,
}

impl<T> PageBuffer<T> {
    fn new(mut elements: Vec<T>, next_cursor: Option<String>, limit: Option<usize>) -> Self {
        if let Some(limit) = limit {
            elements.truncate(limit);
        }
        let mut buffer = Self {
            elements,
            next_cursor,
            limit,
        };
        buffer.release_cursor_at_limit();
        buffer
    }

    /// Once `limit` elements are held no page may be fetched, so the
    /// server's cursor is dropped.
    fn release_cursor_at_limit(&mut self) {
        if self.limit.is_some_and(|limit| self.elements.len() >= limit) {
            self.next_cursor = None;
        }
    }

    fn has_next(&self) -> bool {
        self.next_cursor.is_some() && self.limit.map_or(true, |limit| self.elements.len() < limit)
    }

    /// The cursor to fetch next, or `None` when no fetch may happen.
    fn cursor(&self) -> Option<&str> {
        if self.has_next() {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }

    fn needs_page_for(&self, index: usize) -> bool {
        self.elements.len() <= index && self.has_next()
    }

    fn reachable(&self, index: usize) -> bool {
        self.elements.len() > index || self.has_next()
    }

    /// Append a fetched page, keeping at most `limit` elements overall.
    /// Returns the elements actually appended.
    fn absorb(&mut self, mut items: Vec<T>, next_cursor: Option<String>) -> &[T] {
        self.next_cursor = next_cursor;
        if let Some(limit) = self.limit {
            items.truncate(limit.saturating_sub(self.elements.len()));
        }
        let start = self.elements.len();
        self.elements.extend(items);
        self.release_cursor_at_limit();
        &self.elements[start..]
    }

    fn get(&self, index: usize) -> Result<&T> {
        self.elements.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.elements.len(),
        })
    }
}

/// Decode every item of `page` before anything is stored, so that a bad item
/// leaves the list untouched.
fn decode_page<C, T>(
    client: &C,
    factory: Factory<C, T>,
    page: RawPage,
    base_url: &str,
) -> Result<(Vec<T>, Option<String>)> {
    let items = page
        .data
        .into_iter()
        .map(|raw| factory(client, raw))
        .collect::<Result<Vec<_>>>()?;
    let next_cursor = page.links.next.map(|url| strip_base_url(&url, base_url));
    Ok((items, next_cursor))
}

/// Resolve a range into a start index and an optional exclusive stop index.
fn range_bounds(range: impl RangeBounds<usize>) -> (usize, Option<usize>) {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let stop = match range.end_bound() {
        Bound::Included(&end) => Some(end.saturating_add(1)),
        Bound::Excluded(&end) => Some(end),
        Bound::Unbounded => None,
    };
    (start, stop)
}

/// A blocking, lazily paginated list.
///
/// Created by the listing methods of [`blocking::UpClient`](crate::client::blocking::UpClient)
/// services. Every method that may fetch takes `&mut self` and blocks the
/// calling thread for the duration of the request.
///
/// # Example
///
/// ```no_run
/// use up_bank::api::ListOptions;
///
/// # fn example(client: up_bank::blocking::UpClient) -> up_bank::Result<()> {
/// let mut tags = client.tags().list(ListOptions::default().page_size(10))?;
///
/// // Walk tags 0, 2, 4, ... up to (but excluding) 30.
/// for tag in tags.slice(0..30).step(2) {
///     println!("{}", tag?.id);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedList<T, C> {
    client: C,
    factory: Factory<C, T>,
    buffer: PageBuffer<T>,
}

impl<T, C: Transport> PaginatedList<T, C> {
    /// Create a list from an already fetched first page.
    ///
    /// The first page is truncated to `limit` if it holds more elements.
    pub fn new(
        client: C,
        factory: Factory<C, T>,
        first_page: RawPage,
        limit: Option<usize>,
    ) -> Result<Self> {
        let (items, next_cursor) = decode_page(&client, factory, first_page, client.base_url())?;
        Ok(Self {
            buffer: PageBuffer::new(items, next_cursor, limit),
            client,
            factory,
        })
    }

    /// Returns `true` if another page may be fetched: the server reported
    /// one and the limit has not been reached yet.
    pub fn has_next(&self) -> bool {
        self.buffer.has_next()
    }

    /// Number of elements fetched so far.
    ///
    /// This is not the size of the collection on the server, which is
    /// unknown until [`has_next`](Self::has_next) turns `false`.
    pub fn len(&self) -> usize {
        self.buffer.elements.len()
    }

    /// Returns `true` if no elements have been fetched so far.
    pub fn is_empty(&self) -> bool {
        self.buffer.elements.is_empty()
    }

    /// The elements fetched so far, in server order.
    pub fn elements(&self) -> &[T] {
        &self.buffer.elements
    }

    /// The maximum number of elements this list will ever hold.
    pub fn limit(&self) -> Option<usize> {
        self.buffer.limit
    }

    /// Path of the next page, relative to the client's base URL.
    pub fn next_cursor(&self) -> Option<&str> {
        self.buffer.next_cursor.as_deref()
    }

    /// Fetch the next page and return the elements it added.
    ///
    /// Returns an empty slice without any request when
    /// [`has_next`](Self::has_next) is `false`. On error the list is left
    /// exactly as it was, so the call can simply be repeated.
    pub fn fetch_next_page(&mut self) -> Result<&[T]> {
        let Some(cursor) = self.buffer.cursor() else {
            tracing::debug!("no next page to fetch");
            return Ok(&[]);
        };

        let cursor = cursor.to_owned();
        let page = self.client.fetch_page(&cursor)?;
        let fetched = page.data.len();
        let (items, next_cursor) =
            decode_page(&self.client, self.factory, page, self.client.base_url())?;

        let added = self.buffer.absorb(items, next_cursor);
        tracing::debug!(%cursor, fetched, kept = added.len(), "fetched next page");
        Ok(added)
    }

    /// Get the element at `index`, fetching pages until it is available.
    ///
    /// Fails with [`Error::IndexOutOfRange`] if the collection (or the limit)
    /// ends before `index`.
    pub fn get(&mut self, index: usize) -> Result<&T> {
        while self.buffer.needs_page_for(index) {
            self.fetch_next_page()?;
        }
        self.buffer.get(index)
    }

    /// Fetch every remaining page and return all elements.
    pub fn fetch_all(&mut self) -> Result<&[T]> {
        while self.has_next() {
            self.fetch_next_page()?;
        }
        Ok(self.elements())
    }

    /// Iterate over the whole list, fetching pages as the iterator advances.
    ///
    /// Starts from the elements already fetched without requesting them
    /// again. The iterator ends after yielding the first error.
    pub fn iter(&mut self) -> Slice<'_, T, C> {
        self.slice(..)
    }

    /// Iterate over the elements whose indices fall in `range`.
    ///
    /// An open-ended range runs until the list ends. A bounded range stops
    /// early at the first index the list cannot reach.
    pub fn slice(&mut self, range: impl RangeBounds<usize>) -> Slice<'_, T, C> {
        let (start, stop) = range_bounds(range);
        Slice {
            list: self,
            index: start,
            stop,
            step: 1,
            done: false,
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PaginatedList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatedList")
            .field("elements", &self.buffer.elements)
            .field("next_cursor", &self.buffer.next_cursor)
            .field("limit", &self.buffer.limit)
            .finish()
    }
}

impl<'a, T: Clone, C: Transport> IntoIterator for &'a mut PaginatedList<T, C> {
    type Item = Result<T>;
    type IntoIter = Slice<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a range of a [`PaginatedList`].
///
/// Created by [`PaginatedList::iter`] and [`PaginatedList::slice`].
pub struct Slice<'a, T, C> {
    list: &'a mut PaginatedList<T, C>,
    index: usize,
    stop: Option<usize>,
    step: usize,
    done: bool,
}

impl<'a, T, C> Slice<'a, T, C> {
    /// Visit every `step`-th index of the range.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn step(mut self, step: usize) -> Self {
        assert!(step != 0, "slice step must be non-zero");
        self.step = step;
        self
    }
}

impl<'a, T: Clone, C: Transport> Iterator for Slice<'a, T, C> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done
            || self.stop.is_some_and(|stop| self.index >= stop)
            || !self.list.buffer.reachable(self.index)
        {
            self.done = true;
            return None;
        }

        match self.list.get(self.index).map(T::clone) {
            Ok(element) => {
                self.index = self.index.saturating_add(self.step);
                Some(Ok(element))
            }
            Err(Error::IndexOutOfRange { .. }) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// An async, lazily paginated list.
///
/// Created by the listing methods of [`UpClient`](crate::UpClient) services.
/// Methods that may fetch are `async` and take `&mut self`, so one list is
/// consumed by one task at a time.
pub struct AsyncPaginatedList<T, C> {
    client: C,
    factory: Factory<C, T>,
    buffer: PageBuffer<T>,
}

impl<T, C: AsyncTransport> AsyncPaginatedList<T, C> {
    /// Create a list from an already fetched first page.
    ///
    /// The first page is truncated to `limit` if it holds more elements.
    pub fn new(
        client: C,
        factory: Factory<C, T>,
        first_page: RawPage,
        limit: Option<usize>,
    ) -> Result<Self> {
        let (items, next_cursor) = decode_page(&client, factory, first_page, client.base_url())?;
        Ok(Self {
            buffer: PageBuffer::new(items, next_cursor, limit),
            client,
            factory,
        })
    }

    /// Returns `true` if another page may be fetched: the server reported
    /// one and the limit has not been reached yet.
    pub fn has_next(&self) -> bool {
        self.buffer.has_next()
    }

    /// Number of elements fetched so far, not the size of the collection
    /// on the server.
    pub fn len(&self) -> usize {
        self.buffer.elements.len()
    }

    /// Returns `true` if no elements have been fetched so far.
    pub fn is_empty(&self) -> bool {
        self.buffer.elements.is_empty()
    }

    /// The elements fetched so far, in server order.
    pub fn elements(&self) -> &[T] {
        &self.buffer.elements
    }

    /// The maximum number of elements this list will ever hold.
    pub fn limit(&self) -> Option<usize> {
        self.buffer.limit
    }

    /// Path of the next page, relative to the client's base URL.
    pub fn next_cursor(&self) -> Option<&str> {
        self.buffer.next_cursor.as_deref()
    }

    /// Fetch the next page and return the elements it added.
    ///
    /// Returns an empty slice without any request when
    /// [`has_next`](Self::has_next) is `false`. On error the list is left
    /// exactly as it was.
    pub async fn fetch_next_page(&mut self) -> Result<&[T]> {
        let Some(cursor) = self.buffer.cursor() else {
            tracing::debug!("no next page to fetch");
            return Ok(&[]);
        };

        let cursor = cursor.to_owned();
        let page = self.client.fetch_page(&cursor).await?;
        let fetched = page.data.len();
        let (items, next_cursor) =
            decode_page(&self.client, self.factory, page, self.client.base_url())?;

        let added = self.buffer.absorb(items, next_cursor);
        tracing::debug!(%cursor, fetched, kept = added.len(), "fetched next page");
        Ok(added)
    }

    /// Get the element at `index`, fetching pages until it is available.
    ///
    /// Fails with [`Error::IndexOutOfRange`] if the collection (or the limit)
    /// ends before `index`.
    pub async fn get(&mut self, index: usize) -> Result<&T> {
        while self.buffer.needs_page_for(index) {
            self.fetch_next_page().await?;
        }
        self.buffer.get(index)
    }

    /// Fetch every remaining page and return all elements.
    pub async fn fetch_all(&mut self) -> Result<&[T]> {
        while self.has_next() {
            self.fetch_next_page().await?;
        }
        Ok(self.elements())
    }

    /// Slice `range` out of the list; see [`AsyncSlice`].
    pub fn slice(&mut self, range: impl RangeBounds<usize>) -> AsyncSlice<'_, T, C> {
        let (start, stop) = range_bounds(range);
        AsyncSlice {
            list: self,
            start,
            stop,
            step: 1,
        }
    }
}

impl<T, C> AsyncPaginatedList<T, C>
where
    T: Clone + Send,
    C: AsyncTransport,
{
    /// Stream the whole list, fetching pages as the stream is polled.
    ///
    /// Starts from the elements already fetched without requesting them
    /// again. The stream ends after yielding the first error.
    pub fn stream(&mut self) -> impl Stream<Item = Result<T>> + Send + '_ {
        walk(self, 0, None, 1)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for AsyncPaginatedList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncPaginatedList")
            .field("elements", &self.buffer.elements)
            .field("next_cursor", &self.buffer.next_cursor)
            .field("limit", &self.buffer.limit)
            .finish()
    }
}

/// A range of an [`AsyncPaginatedList`], consumed as a stream.
///
/// Created by [`AsyncPaginatedList::slice`].
pub struct AsyncSlice<'a, T, C> {
    list: &'a mut AsyncPaginatedList<T, C>,
    start: usize,
    stop: Option<usize>,
    step: usize,
}

impl<'a, T, C> AsyncSlice<'a, T, C>
where
    T: Clone + Send,
    C: AsyncTransport,
{
    /// Visit every `step`-th index of the range.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn step(mut self, step: usize) -> Self {
        assert!(step != 0, "slice step must be non-zero");
        self.step = step;
        self
    }

    /// Turn the slice into a stream of its elements.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + Send + 'a {
        walk(self.list, self.start, self.stop, self.step)
    }
}

/// Stream indices `start, start + step, ...` below `stop` until one is
/// unreachable or a fetch fails.
fn walk<'a, T, C>(
    list: &'a mut AsyncPaginatedList<T, C>,
    start: usize,
    stop: Option<usize>,
    step: usize,
) -> impl Stream<Item = Result<T>> + Send + 'a
where
    T: Clone + Send,
    C: AsyncTransport,
{
    stream::unfold(Some((list, start)), move |state| async move {
        let (list, index) = state?;
        if stop.is_some_and(|stop| index >= stop) || !list.buffer.reachable(index) {
            return None;
        }

        match list.get(index).await.map(T::clone) {
            Ok(element) => Some((Ok(element), Some((list, index.saturating_add(step))))),
            Err(Error::IndexOutOfRange { .. }) => None,
            Err(e) => Some((Err(e), None)),
        }
    })
}
