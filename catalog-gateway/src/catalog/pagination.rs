/// `first`/`offset` window over an already-sorted listing. An offset past the
/// end yields an empty page rather than an error.
pub fn paginate<T>(items: Vec<T>, first: Option<usize>, offset: Option<usize>) -> Vec<T> {
    let rest = items.into_iter().skip(offset.unwrap_or(0));
    match first {
        Some(first) => rest.take(first).collect(),
        None => rest.collect(),
    }
}
