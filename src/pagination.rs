//! Flattening of paginated list endpoints.
//!
//! The inventory API pages every list (`page` is 1-indexed, `page_size` items
//! per page). Views want the whole collection in memory so they can search,
//! filter and sort locally, so they go through [`fetch_all_pages`].

use std::future::Future;

use log::debug;

use crate::models::Page;

/// Page size used when the caller has no preference.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Fetch every page and concatenate the items in server order.
///
/// Pages are requested strictly one after another, starting at page 1, and
/// the loop stops at the first page that does not hold exactly `page_size`
/// items. A collection whose size is an exact multiple of `page_size`
/// therefore costs one extra request that comes back empty. The `count` in each page is not
/// used to stop early.
///
/// The first failing request aborts the whole fetch; nothing fetched so far is
/// returned and nothing is retried.
pub async fn fetch_all_pages<T, E, F, Fut>(mut fetch_page: F, page_size: usize) -> Result<Vec<T>, E>
where
    F: FnMut(u32, usize) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let page_size = page_size.max(1);
    let mut all_items = Vec::new();
    let mut page: u32 = 1;

    loop {
        let Page { items, .. } = fetch_page(page, page_size).await?;
        let fetched = items.len();
        all_items.extend(items);
        debug!("Fetched page {} ({} items, {} total)", page, fetched, all_items.len());

        if fetched != page_size {
            break;
        }
        page += 1;
    }

    Ok(all_items)
}
