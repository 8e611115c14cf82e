use std::cmp::Ordering;

/// Keeps the first `limit` rows of every partition under `rank_order`.
///
/// Output is ordered by partition key ascending, then by `rank_order` within
/// each partition. Rows comparing equal under both keep no particular order,
/// so callers should fold a tie-break into `rank_order`.
pub fn top_n_per_partition<T, K, P, C>(
    mut rows: Vec<T>,
    limit: usize,
    partition_key: P,
    rank_order: C,
) -> Vec<T>
where
    K: Ord,
    P: Fn(&T) -> K,
    C: Fn(&T, &T) -> Ordering,
{
    if limit == 0 {
        return Vec::new();
    }

    rows.sort_by(|a, b| {
        partition_key(a)
            .cmp(&partition_key(b))
            .then_with(|| rank_order(a, b))
    });

    let mut kept = Vec::new();
    let mut current: Option<K> = None;
    let mut rank = 0usize;

    for row in rows {
        let key = partition_key(&row);
        if current.as_ref() != Some(&key) {
            current = Some(key);
            rank = 0;
        }

        rank += 1;
        if rank <= limit {
            kept.push(row);
        }
    }

    kept
}

/// Descending order for optional values with `None` sorted last.
pub fn descending_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
