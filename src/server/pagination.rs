pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the `page`-th window (1-based) of `items`. Pages below 1 or past the end are empty.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    if page < 1 {
        return &[];
    }
    let start = usize::try_from(page - 1)
        .unwrap_or(usize::MAX)
        .saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_are_ten_wide() {
        let items: Vec<i64> = (1..=25).collect();
        assert_eq!(paginate(&items, 1), &items[0..10]);
        assert_eq!(paginate(&items, 2), &items[10..20]);
        assert_eq!(paginate(&items, 3), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<i64> = (1..=25).collect();
        assert!(paginate(&items, 4).is_empty());
        assert!(paginate(&items, 0).is_empty());
        assert!(paginate(&items, -1).is_empty());
        assert!(paginate(&items, i64::MAX).is_empty());
        assert!(paginate::<i64>(&[], 1).is_empty());
    }
}
