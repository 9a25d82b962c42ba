//! Conditional parallel evaluation.
//!
//! Uses rayon when the `parallel` feature is enabled and the execution
//! config asks for it. Output order always matches input order.

use crate::config::ExecutionConfig;

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection size exceeds `config.parallel_threshold`
///
/// rayon's indexed `collect` keeps results in input order, so callers see
/// the same sequence either way.
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &ExecutionConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_map_preserves_order() {
        let config = ExecutionConfig::sequential();
        let items: Vec<u32> = (0..50).collect();
        let doubled = maybe_parallel_map(&items, &config, |x| x * 2);
        assert_eq!(doubled, (0..50).map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_parallel_map_preserves_order() {
        let config = ExecutionConfig::default().with_threshold(0);
        let items: Vec<u64> = (0..10_000).collect();
        let squared = maybe_parallel_map(&items, &config, |x| x * x);
        assert!(squared.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(squared.len(), items.len());
    }
}
