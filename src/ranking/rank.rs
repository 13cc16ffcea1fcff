use serde::Serialize;
use std::cmp::Ordering;

use crate::catalog::number::sort_key;
use crate::catalog::Phone;

/// Something that carries the two scores the ranker orders by.
///
/// Implementations return the value used for sorting only; missing or
/// non-numeric scores should come back as 0.
pub trait Rankable {
    fn raw_score_key(&self) -> f64;
    fn value_score_key(&self) -> f64;
}

impl Rankable for Phone {
    fn raw_score_key(&self) -> f64 {
        sort_key(self.raw_score.as_ref())
    }

    fn value_score_key(&self) -> f64 {
        sort_key(self.smartbuy_score.as_ref())
    }
}

/// An item annotated with its position in each ordering. All ranks are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem<T> {
    #[serde(flatten)]
    pub item: T,
    pub rank_final: usize, // Position in the order the server returned
    pub rank_raw: usize,   // Position by raw capability score
    pub rank_value: usize, // Position by value-for-money score
    pub rank_total: usize,
}

impl<T> RankedItem<T> {
    /// Drop the rank annotations and get the original item back
    pub fn into_inner(self) -> T {
        self.item
    }
}

/// Annotate items with their raw, value and final ranks.
///
/// The output keeps the input order: `rank_final` is simply the 1-based
/// position, since the server already sorts by its blended score. Raw and
/// value ranks come from a descending stable sort, so equal scores keep their
/// input order. Input items are cloned, never modified.
pub fn rank<T: Rankable + Clone>(items: &[T]) -> Vec<RankedItem<T>> {
    let total = items.len();
    let raw_ranks = ranks_by(items, T::raw_score_key);
    let value_ranks = ranks_by(items, T::value_score_key);

    items
        .iter()
        .zip(raw_ranks.into_iter().zip(value_ranks))
        .enumerate()
        .map(|(idx, (item, (rank_raw, rank_value)))| RankedItem {
            item: item.clone(),
            rank_final: idx + 1,
            rank_raw,
            rank_value,
            rank_total: total,
        })
        .collect()
}

/// Rank lookup keyed by input position: `result[i]` is the rank of `items[i]`.
fn ranks_by<T, F>(items: &[T], score: F) -> Vec<usize>
where
    F: Fn(&T) -> f64,
{
    let keys: Vec<f64> = items
        .iter()
        .map(|item| {
            let k = score(item);
            if k.is_finite() {
                k
            } else {
                0.0
            }
        })
        .collect();

    // Vec::sort_by is stable, so ties keep input order
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[b].partial_cmp(&keys[a]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0; keys.len()];
    for (position, idx) in order.into_iter().enumerate() {
        ranks[idx] = position + 1;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LenientNumber;
    use proptest::prelude::*;
    use serde_json::json;

    fn phone(id: &str, raw: Option<f64>, value: Option<f64>) -> Phone {
        Phone {
            slug: Some(id.to_string()),
            raw_score: raw.map(LenientNumber::from),
            smartbuy_score: value.map(LenientNumber::from),
            ..Phone::default()
        }
    }

    fn slugs(ranked: &[RankedItem<Phone>]) -> Vec<String> {
        ranked
            .iter()
            .map(|r| r.item.slug.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let ranked = rank::<Phone>(&[]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_two_item_example() {
        let items = vec![
            phone("1", Some(8.0), Some(1.0)),
            phone("2", Some(6.0), Some(2.0)),
        ];
        let ranked = rank(&items);

        assert_eq!(ranked[0].rank_final, 1);
        assert_eq!(ranked[0].rank_raw, 1);
        assert_eq!(ranked[0].rank_value, 2);
        assert_eq!(ranked[0].rank_total, 2);

        assert_eq!(ranked[1].rank_final, 2);
        assert_eq!(ranked[1].rank_raw, 2);
        assert_eq!(ranked[1].rank_value, 1);
        assert_eq!(ranked[1].rank_total, 2);
    }

    #[test]
    fn test_output_keeps_input_order() {
        let items = vec![
            phone("low", Some(2.0), Some(0.5)),
            phone("high", Some(9.0), Some(1.5)),
            phone("mid", Some(5.0), Some(1.0)),
        ];
        let ranked = rank(&items);
        assert_eq!(slugs(&ranked), vec!["low", "high", "mid"]);
        assert_eq!(
            ranked.iter().map(|r| r.rank_raw).collect::<Vec<_>>(),
            vec![3, 1, 2]
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let items = vec![
            phone("a", Some(7.0), Some(1.0)),
            phone("b", Some(7.0), Some(1.0)),
            phone("c", Some(7.0), Some(1.0)),
        ];
        let ranked = rank(&items);
        assert_eq!(
            ranked.iter().map(|r| r.rank_raw).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            ranked.iter().map(|r| r.rank_value).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_missing_scores_sort_as_zero() {
        let items = vec![
            phone("missing", None, None),
            phone("negative", Some(-1.0), Some(-1.0)),
            phone("positive", Some(1.0), Some(1.0)),
        ];
        let ranked = rank(&items);
        // missing == 0 sorts above -1 but below 1
        assert_eq!(ranked[0].rank_raw, 2);
        assert_eq!(ranked[1].rank_raw, 3);
        assert_eq!(ranked[2].rank_raw, 1);
    }

    #[test]
    fn test_non_numeric_score_preserved() {
        let mut odd = phone("odd", None, Some(1.0));
        odd.raw_score = Some(LenientNumber(json!("n/a")));
        let items = vec![phone("ok", Some(3.0), Some(0.5)), odd];

        let ranked = rank(&items);
        assert_eq!(ranked[1].rank_raw, 2);
        assert_eq!(ranked[1].item.raw_score, Some(LenientNumber(json!("n/a"))));
    }

    #[test]
    fn test_input_not_modified() {
        let items = vec![phone("a", Some(1.0), Some(2.0))];
        let before = items.clone();
        let _ = rank(&items);
        assert_eq!(items, before);
    }

    #[test]
    fn test_serializes_flat() {
        let ranked = rank(&[phone("a", Some(8.0), Some(1.0))]);
        let value = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(value["slug"], json!("a"));
        assert_eq!(value["rank_final"], json!(1));
        assert_eq!(value["rank_total"], json!(1));
    }

    fn scores() -> impl Strategy<Value = Vec<(Option<f64>, Option<f64>)>> {
        prop::collection::vec(
            (
                prop::option::of(-2.0f64..12.0),
                prop::option::of(0.0f64..3.0),
            ),
            0..40,
        )
    }

    fn build(scores: &[(Option<f64>, Option<f64>)]) -> Vec<Phone> {
        scores
            .iter()
            .enumerate()
            .map(|(i, (raw, value))| phone(&i.to_string(), *raw, *value))
            .collect()
    }

    fn is_permutation(mut ranks: Vec<usize>) -> bool {
        ranks.sort_unstable();
        ranks.into_iter().enumerate().all(|(i, r)| r == i + 1)
    }

    proptest! {
        /// Property: final rank is the input position, and the length is unchanged.
        #[test]
        fn final_rank_mirrors_input(scores in scores()) {
            let items = build(&scores);
            let ranked = rank(&items);
            prop_assert_eq!(ranked.len(), items.len());
            for (i, r) in ranked.iter().enumerate() {
                prop_assert_eq!(r.rank_final, i + 1);
                prop_assert_eq!(r.rank_total, items.len());
                prop_assert_eq!(&r.item, &items[i]);
            }
        }

        /// Property: raw and value ranks are each a permutation of 1..=N.
        #[test]
        fn ranks_are_permutations(scores in scores()) {
            let ranked = rank(&build(&scores));
            prop_assert!(is_permutation(ranked.iter().map(|r| r.rank_raw).collect()));
            prop_assert!(is_permutation(ranked.iter().map(|r| r.rank_value).collect()));
        }

        /// Property: a strictly higher raw score always gets a better rank,
        /// and equal scores keep their input order.
        #[test]
        fn raw_rank_follows_score(scores in scores()) {
            let items = build(&scores);
            let ranked = rank(&items);
            for i in 0..ranked.len() {
                for j in (i + 1)..ranked.len() {
                    let (a, b) = (items[i].raw_score_key(), items[j].raw_score_key());
                    if a > b {
                        prop_assert!(ranked[i].rank_raw < ranked[j].rank_raw);
                    } else if a < b {
                        prop_assert!(ranked[i].rank_raw > ranked[j].rank_raw);
                    } else {
                        prop_assert!(ranked[i].rank_raw < ranked[j].rank_raw);
                    }
                }
            }
        }

        /// Property: the same ordering holds for value ranks.
        #[test]
        fn value_rank_follows_score(scores in scores()) {
            let items = build(&scores);
            let ranked = rank(&items);
            for i in 0..ranked.len() {
                for j in (i + 1)..ranked.len() {
                    let (a, b) = (items[i].value_score_key(), items[j].value_score_key());
                    if a > b {
                        prop_assert!(ranked[i].rank_value < ranked[j].rank_value);
                    } else if a < b {
                        prop_assert!(ranked[i].rank_value > ranked[j].rank_value);
                    } else {
                        prop_assert!(ranked[i].rank_value < ranked[j].rank_value);
                    }
                }
            }
        }

        /// Property: ranking the stripped output again gives the same ranks.
        #[test]
        fn reranking_is_stable(scores in scores()) {
            let first = rank(&build(&scores));
            let stripped: Vec<Phone> = first.iter().cloned().map(RankedItem::into_inner).collect();
            let second = rank(&stripped);
            prop_assert_eq!(first, second);
        }
    }
}
