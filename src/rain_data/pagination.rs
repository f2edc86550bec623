//! The offset/limit pagination loop shared by paginated heavyRAIN queries.
//!
//! Termination convention: the loop stops as soon as a page comes back with
//! strictly fewer records than requested, i.e. a short page or an empty one. This
//! needs no total-count signal from the server; the trade-off is that a
//! result set whose size is an exact multiple of the page size costs one
//! extra request whose empty body terminates the loop.

use crate::rain_data::dataset::Dataset;
use crate::rain_data::error::{FetchError, PaginatedFetchError};
use crate::types::reading::RainReading;
use log::{debug, info};

/// A source of record pages, usually one HTTP endpoint plus a fixed query.
///
/// The fetch loop is written against this trait so the pagination behavior
/// can be exercised without a live server.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetches the records in `[offset, offset + limit)`.
    async fn fetch_page(&self, offset: u64, limit: u32) -> Result<Vec<RainReading>, FetchError>;
}

/// Fetches every page of a query and concatenates them in fetch order.
///
/// One request is in flight at a time; each page is awaited before the next
/// offset is requested. `max_pages` bounds the loop against a server that
/// keeps returning full pages forever. On any page failure the records
/// already fetched are returned inside the error rather than discarded.
///
/// With `dedup` set, records sharing (`dev_eui`, `city`, `timestamp`) are
/// collapsed to their first occurrence after the loop finishes; this absorbs
/// the page-boundary repeats that appear when rows are inserted server-side
/// between two page requests of a newest-first query.
pub async fn fetch_all_pages<S: PageSource>(
    source: &S,
    page_size: u32,
    max_pages: u32,
    dedup: bool,
) -> Result<Dataset, PaginatedFetchError> {
    let mut records: Vec<RainReading> = Vec::new();
    let mut offset: u64 = 0;
    let mut pages: u32 = 0;

    loop {
        if pages >= max_pages {
            return Err(PaginatedFetchError {
                offset,
                partial: finish(records, pages, dedup),
                source: FetchError::PageLimitReached { max_pages, offset },
            });
        }

        let page = match source.fetch_page(offset, page_size).await {
            Ok(page) => page,
            Err(source) => {
                return Err(PaginatedFetchError {
                    offset,
                    partial: finish(records, pages, dedup),
                    source,
                })
            }
        };

        pages += 1;
        let fetched = page.len();
        debug!("page {} at offset {}: {} records", pages, offset, fetched);
        records.extend(page);

        if fetched < page_size as usize {
            break;
        }
        offset += page_size as u64;
    }

    let dataset = finish(records, pages, dedup);
    info!(
        "fetched {} records in {} page(s)",
        dataset.len(),
        dataset.pages()
    );
    Ok(dataset)
}

fn finish(records: Vec<RainReading>, pages: u32, dedup: bool) -> Dataset {
    let mut dataset = Dataset::new(records, pages);
    if dedup {
        dataset.dedup();
    }
    dataset
}
