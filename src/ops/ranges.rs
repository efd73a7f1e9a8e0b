/// Compresses a list of stable residue indices into inclusive contiguous
/// ranges, e.g. `[3, 4, 5, 9, 10, 12]` → `[(3, 5), (9, 10), (12, 12)]`.
///
/// Runs are detected in the order given; the input is not sorted first.
pub fn to_ranges(values: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut iter = values.iter().copied();

    let Some(first) = iter.next() else {
        return ranges;
    };

    let mut start = first;
    let mut end = first;
    for value in iter {
        if value == end + 1 {
            end = value;
        } else {
            ranges.push((start, end));
            start = value;
            end = value;
        }
    }
    ranges.push((start, end));

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_ranges_compresses_contiguous_runs() {
        assert_eq!(
            to_ranges(&[3, 4, 5, 9, 10, 12]),
            vec![(3, 5), (9, 10), (12, 12)]
        );
    }

    #[test]
    fn to_ranges_handles_empty_input() {
        assert_eq!(to_ranges(&[]), Vec::<(usize, usize)>::new());
    }

    #[test]
    fn to_ranges_handles_single_value() {
        assert_eq!(to_ranges(&[7]), vec![(7, 7)]);
    }

    #[test]
    fn to_ranges_breaks_runs_at_discovery_order() {
        // Discovery order is preserved, so out-of-order indices never merge.
        assert_eq!(to_ranges(&[5, 4, 3]), vec![(5, 5), (4, 4), (3, 3)]);
    }
}
