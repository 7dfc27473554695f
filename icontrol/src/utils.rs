//! Helpers for batching queries and displaying object names

/// Splits `items` into ordered pages of `page_size` elements.
///
/// The last page holds the remainder. A `page_size` of 0 yields a single
/// page and an empty input yields no page at all.
pub fn paginate<T: Clone>(items: &[T], page_size: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return Vec::new();
    }
    if page_size == 0 {
        return vec![items.to_vec()];
    }
    items.chunks(page_size).map(<[T]>::to_vec).collect()
}

/// Name without its partition and folder, `/Common/app/pool_a` → `pool_a`.
///
/// Returns `None` when `path` is not a `/partition/name` path.
pub fn short_name(path: &str) -> Option<&str> {
    let (prefix, name) = path.rsplit_once('/')?;
    prefix.contains('/').then_some(name)
}
