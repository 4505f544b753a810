//! Comparator and collection helpers.

use std::cmp::Ordering;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::model::Value;

/// Null-safe three-way comparison of two items through a selector.
///
/// Null values are the smallest; the direction is applied afterwards, so in
/// descending order nulls come last. See [`Value::compare`] for the ordering
/// of non-null values.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use emtable_lib::model::Value;
/// use emtable_lib::util::array::compare;
///
/// let name = |s: &&str| Value::from(*s);
/// assert_eq!(compare(&"a", &"B", name, true), Ordering::Less);
/// assert_eq!(compare(&"a", &"B", name, false), Ordering::Greater);
/// ```
pub fn compare<I, F>(a: &I, b: &I, selector: F, ascending: bool) -> Ordering
where
    F: Fn(&I) -> Value,
{
    let ordering = selector(a).compare(&selector(b));
    if ascending { ordering } else { ordering.reverse() }
}

/// Stable in-place sort through a selector; returns the same slice.
///
/// Callers that must keep the original order have to sort a copy.
pub fn sort<I, F>(items: &mut [I], selector: F, ascending: bool) -> &mut [I]
where
    F: Fn(&I) -> Value,
{
    // selector runs once per item
    let mut keyed: Vec<(Value, usize)> = items.iter().map(&selector).zip(0..).collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.compare(b);
        if ascending { ordering } else { ordering.reverse() }
    });
    let order: Vec<usize> = keyed.into_iter().map(|(_, idx)| idx).collect();
    apply_permutation(items, order);
    items
}

fn apply_permutation<I>(items: &mut [I], mut order: Vec<usize>) {
    // order[i] is the index of the item that belongs at position i
    for start in 0..order.len() {
        let mut current = start;
        while order[current] != start {
            let next = order[current];
            items.swap(current, next);
            order[current] = current;
            current = next;
        }
        order[current] = current;
    }
}

/// Groups items by key, keeping keys and items in encounter order.
pub fn group_by<K, V, F>(items: impl IntoIterator<Item = V>, key_selector: F) -> IndexMap<K, Vec<V>>
where
    K: Hash + Eq,
    F: Fn(&V) -> K,
{
    let mut groups: IndexMap<K, Vec<V>> = IndexMap::new();
    for item in items {
        groups.entry(key_selector(&item)).or_default().push(item);
    }
    groups
}

/// First occurrence of every distinct item, in encounter order.
///
/// Uses equality rather than hashing, which is quadratic but fine for
/// in-memory table data.
pub fn distinct<T: PartialEq + Clone>(items: &[T]) -> Vec<T> {
    let mut unique: Vec<T> = Vec::new();
    for item in items {
        if !unique.contains(item) {
            unique.push(item.clone());
        }
    }
    unique
}

/// Concatenates nested collections.
pub fn flatten<T>(collections: impl IntoIterator<Item = Vec<T>>) -> Vec<T> {
    collections.into_iter().flatten().collect()
}

/// Difference between the largest and smallest value, `None` when empty.
pub fn spread(values: &[f64]) -> Option<f64> {
    let min = values.iter().copied().reduce(f64::min)?;
    let max = values.iter().copied().reduce(f64::max)?;
    Some(max - min)
}
