/// Rank each value from the largest down (largest = 1). Tied values share
/// the mean of the positions they occupy; missing values get no rank.
pub fn rank_descending(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut order: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut ranks = vec![None; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && order[end].1 == order[start].1 {
            end += 1;
        }
        // positions start+1 ..= end, averaged
        let rank = (start + 1 + end) as f64 / 2.0;
        for &(i, _) in &order[start..end] {
            ranks[i] = Some(rank);
        }
        start = end;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_share_average_rank() {
        let ranks = rank_descending(&[Some(100.0), Some(100.0), Some(50.0)]);
        assert_eq!(ranks, vec![Some(1.5), Some(1.5), Some(3.0)]);
    }

    #[test]
    fn missing_values_are_unranked() {
        let ranks = rank_descending(&[Some(10.0), None, Some(30.0), Some(20.0), Some(20.0), Some(20.0)]);
        assert_eq!(
            ranks,
            vec![Some(5.0), None, Some(1.0), Some(3.0), Some(3.0), Some(3.0)]
        );
    }
}
