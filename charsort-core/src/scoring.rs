/// Score ordering shared by tiering and the results view.
///
/// Pure functions — no state, no randomness. Ties always keep insertion
/// order (the sort is stable), so a freshly reset session ranks items
/// exactly as they were supplied.
use crate::types::Item;

/// Indices of `scores` ordered by score descending, ties by index ascending.
pub(crate) fn rank_order(scores: &[u32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].cmp(&scores[a]));
    order
}

/// All items sorted by score descending, ties broken by their position in
/// `items`. Does not mutate anything.
pub fn compute_rankings(items: &[Item]) -> Vec<&Item> {
    let scores: Vec<u32> = items.iter().map(|i| i.score).collect();
    rank_order(&scores).into_iter().map(|idx| &items[idx]).collect()
}

/// Sum of all scores. Equals the number of preferences recorded.
pub fn total_score(items: &[Item]) -> u64 {
    items.iter().map(|i| u64::from(i.score)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, score: u32) -> Item {
        Item { score, ..Item::new(id) }
    }

    #[test]
    fn test_rank_order_descending() {
        assert_eq!(rank_order(&[1, 3, 2]), vec![1, 2, 0]);
    }

    #[test]
    fn test_rank_order_ties_keep_insertion_order() {
        assert_eq!(rank_order(&[0, 2, 0, 2, 0]), vec![1, 3, 0, 2, 4]);
        assert!(rank_order(&[]).is_empty());
    }

    #[test]
    fn test_compute_rankings() {
        let items = vec![item("a", 1), item("b", 0), item("c", 4), item("d", 1)];
        let ids: Vec<&str> = compute_rankings(&items).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "d", "b"]);
        assert_eq!(total_score(&items), 6);
    }

    #[test]
    fn test_compute_rankings_is_idempotent() {
        let items = vec![item("x", 2), item("y", 2), item("z", 5)];
        let first: Vec<String> = compute_rankings(&items).iter().map(|i| i.id.clone()).collect();
        let second: Vec<String> = compute_rankings(&items).iter().map(|i| i.id.clone()).collect();
        assert_eq!(first, second);
    }
}
