use std::future::Future;

use serde::Serialize;

use crate::core::config::DashboardSettings;

/// Smallest page size ever handed out. Keeps the page arithmetic away from
/// zero-sized pages even when callers ask for less.
pub(crate) const MIN_PER_PAGE: i64 = 2;

/// Page selection as requested by the caller, already parsed into integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PageRequest {
    /// 1-based page number. `None`, zero and negatives all mean the first page.
    pub(crate) page: Option<i64>,
    pub(crate) per_page: Option<i64>,
}

/// Fetch and display parameters for one page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Pagination {
    pub(crate) count: i64,
    pub(crate) per_page: i64,
    /// Zero-based.
    pub(crate) curr_page: i64,
    /// 1-based page numbers to offer in a page selector.
    pub(crate) num_pages: Vec<i64>,
    pub(crate) limit: i64,
    pub(crate) skip: i64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Paginator {
    default_per_page: i64,
}

impl Paginator {
    pub(crate) fn new(default_per_page: i64) -> Self {
        Self { default_per_page }
    }

    pub(crate) fn from_settings(settings: &DashboardSettings) -> Self {
        Self::new(settings.per_page)
    }

    /// Computes the page window for `count` records.
    ///
    /// Never fails: page sizes below [`MIN_PER_PAGE`] are raised to it and
    /// pages before the first are treated as the first. Pages past the end are
    /// not rejected, they just produce a `skip` beyond `count`.
    ///
    /// `skip` saturates at `i64::MAX`, so `skip == curr_page * per_page` only
    /// holds while that product fits in an `i64`.
    pub(crate) fn paginate(&self, request: PageRequest, count: i64) -> Pagination {
        let per_page = request.per_page.unwrap_or(self.default_per_page).max(MIN_PER_PAGE);
        let curr_page = match request.page {
            Some(page) if page > 0 => page - 1,
            _ => 0,
        };
        let count = count.max(0);

        let full_pages = count / per_page;
        let extra_pages = if count % per_page != 0 { 2 } else { 1 };
        let num_pages = (1..full_pages + extra_pages).collect();

        Pagination {
            count,
            per_page,
            curr_page,
            num_pages,
            limit: per_page,
            skip: curr_page.saturating_mul(per_page),
        }
    }

    /// Like [`Paginator::paginate`], but resolves a missing total through
    /// `fetch_count` first. Errors from the lookup are returned untouched.
    pub(crate) async fn paginate_with_count<F, Fut, E>(
        &self,
        request: PageRequest,
        count: Option<i64>,
        fetch_count: F,
    ) -> Result<Pagination, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<i64, E>>,
    {
        let count = match count {
            Some(count) => count,
            None => fetch_count().await?,
        };

        Ok(self.paginate(request, count))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    fn request(page: Option<i64>, per_page: Option<i64>) -> PageRequest {
        PageRequest { page, per_page }
    }

    #[test]
    fn default_page_size_fits_single_page() {
        let result = Paginator::new(25).paginate(request(None, None), 25);
        assert_eq!(result.per_page, 25);
        assert_eq!(result.limit, 25);
        assert_eq!(result.curr_page, 0);
        assert_eq!(result.skip, 0);
        assert_eq!(result.num_pages, vec![1]);
        assert_eq!(result.count, 25);
    }

    #[test]
    fn remainder_adds_trailing_page() {
        let result = Paginator::new(25).paginate(request(Some(2), Some(3)), 10);
        assert_eq!(result.curr_page, 1);
        assert_eq!(result.skip, 3);
        assert_eq!(result.per_page, 3);
        assert_eq!(result.num_pages, vec![1, 2, 3, 4]);
    }

    #[test]
    fn empty_listing_has_no_pages() {
        let result = Paginator::new(25).paginate(request(None, None), 0);
        assert!(result.num_pages.is_empty());
        assert_eq!(result.skip, 0);
        assert_eq!(result.count, 0);
    }

    #[test]
    fn page_size_is_floored() {
        let result = Paginator::new(25).paginate(request(Some(1), Some(1)), 5);
        assert_eq!(result.per_page, 2);
        assert_eq!(result.limit, 2);
        assert_eq!(result.curr_page, 0);
        assert_eq!(result.skip, 0);
        assert_eq!(result.num_pages, vec![1, 2, 3]);
    }

    #[test]
    fn zero_and_negative_page_sizes_are_floored() {
        let paginator = Paginator::new(25);
        assert_eq!(paginator.paginate(request(None, Some(0)), 9).per_page, MIN_PER_PAGE);
        assert_eq!(paginator.paginate(request(None, Some(-4)), 9).per_page, MIN_PER_PAGE);
    }

    #[test]
    fn small_default_is_floored_too() {
        let result = Paginator::new(1).paginate(request(None, None), 3);
        assert_eq!(result.per_page, 2);
        assert_eq!(result.num_pages, vec![1, 2]);
    }

    #[test]
    fn non_positive_pages_map_to_first_page() {
        let paginator = Paginator::new(10);
        for page in [None, Some(0), Some(-1), Some(i64::MIN)] {
            let result = paginator.paginate(request(page, None), 100);
            assert_eq!(result.curr_page, 0, "page {page:?}");
            assert_eq!(result.skip, 0, "page {page:?}");
        }
    }

    #[test]
    fn page_past_the_end_is_not_rejected() {
        let result = Paginator::new(10).paginate(request(Some(50), None), 15);
        assert_eq!(result.curr_page, 49);
        assert_eq!(result.skip, 490);
        assert_eq!(result.num_pages, vec![1, 2]);
    }

    #[test]
    fn page_count_tracks_total() {
        let paginator = Paginator::new(25);
        for per_page in 2..12 {
            for count in 0..60 {
                for page in [None, Some(1), Some(3), Some(7)] {
                    let result = paginator.paginate(request(page, Some(per_page)), count);
                    assert_eq!(result.skip, result.curr_page * result.per_page);
                    assert_eq!(result.limit, result.per_page);

                    let expected_len = if count == 0 {
                        0
                    } else if count % per_page == 0 {
                        count / per_page
                    } else {
                        count / per_page + 1
                    };
                    assert_eq!(result.num_pages.len() as i64, expected_len, "{count}/{per_page}");
                    assert!(result
                        .num_pages
                        .iter()
                        .enumerate()
                        .all(|(index, number)| *number == index as i64 + 1));
                }
            }
        }
    }

    #[test]
    fn huge_page_saturates_skip() {
        let result = Paginator::new(10).paginate(request(Some(i64::MAX), None), 15);
        assert_eq!(result.curr_page, i64::MAX - 1);
        assert_eq!(result.skip, i64::MAX);
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        let paginator = Paginator::new(25);
        let first = paginator.paginate(request(Some(3), Some(4)), 17);
        let second = paginator.paginate(request(Some(3), Some(4)), 17);
        assert_eq!(first, second);
    }

    #[test]
    fn serializes_with_blueprint_field_names() {
        let result = Paginator::new(25).paginate(request(Some(2), Some(3)), 10);
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["curr_page"], 1);
        assert_eq!(json["num_pages"], serde_json::json!([1, 2, 3, 4]));
        assert_eq!(json["limit"], 3);
        assert_eq!(json["skip"], 3);
        assert_eq!(json["count"], 10);
    }

    #[tokio::test]
    async fn known_count_skips_lookup() {
        let called = AtomicBool::new(false);
        let called_ref = &called;
        let result = Paginator::new(25)
            .paginate_with_count(request(None, None), Some(7), || async move {
                called_ref.store(true, Ordering::SeqCst);
                Ok::<_, std::io::Error>(100)
            })
            .await
            .expect("pagination");

        assert_eq!(result.count, 7);
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn missing_count_is_looked_up() {
        let result = Paginator::new(4)
            .paginate_with_count(request(Some(2), None), None, || async {
                Ok::<_, std::io::Error>(9)
            })
            .await
            .expect("pagination");

        assert_eq!(result.count, 9);
        assert_eq!(result.skip, 4);
        assert_eq!(result.num_pages, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn lookup_failure_is_propagated() {
        let result = Paginator::new(4)
            .paginate_with_count(request(None, None), None, || async {
                Err::<i64, _>(std::io::Error::new(std::io::ErrorKind::Other, "db down"))
            })
            .await;

        let err = result.expect_err("lookup error");
        assert_eq!(err.to_string(), "db down");
    }
}
