//! Cluster ranking by mean score of each cluster's best-scoring members.

use crate::io::cluster::ClusterMembers;
use crate::ops::error::Error;
use std::collections::HashMap;

/// Number of top members whose scores are averaged per cluster. Clusters with
/// fewer members average over all of them.
pub const TOP_N: usize = 4;

/// One cluster after ranking. Ranks are 1-based and dense; lower mean score is
/// better, so rank 1 holds the lowest mean.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCluster {
    pub rank: usize,
    pub cluster: u32,
    pub mean_score: f64,
}

/// Ranks clusters by ascending mean score of their first [`TOP_N`] declared
/// members (the membership listing is already in descending-quality order).
/// Ties keep the original declaration order. A member without a score entry is
/// a fatal consistency error.
pub fn rank_clusters(
    scores: &HashMap<usize, f64>,
    clusters: &[ClusterMembers],
) -> Result<Vec<RankedCluster>, Error> {
    let mut means: Vec<(u32, f64)> = Vec::with_capacity(clusters.len());

    for cluster in clusters {
        if cluster.members.is_empty() {
            return Err(Error::EmptyCluster {
                cluster: cluster.id,
            });
        }

        let top = &cluster.members[..cluster.members.len().min(TOP_N)];
        let mut sum = 0.0;
        for &model in top {
            let score = scores.get(&model).ok_or(Error::MissingScore {
                cluster: cluster.id,
                model,
            })?;
            sum += score;
        }
        means.push((cluster.id, sum / top.len() as f64));
    }

    // Stable sort keeps declaration order among equal means.
    means.sort_by(|a, b| a.1.total_cmp(&b.1));

    Ok(means
        .into_iter()
        .enumerate()
        .map(|(i, (cluster, mean_score))| RankedCluster {
            rank: i + 1,
            cluster,
            mean_score,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(usize, f64)]) -> HashMap<usize, f64> {
        pairs.iter().copied().collect()
    }

    fn cluster(id: u32, members: &[usize]) -> ClusterMembers {
        ClusterMembers {
            id,
            members: members.to_vec(),
        }
    }

    #[test]
    fn rank_clusters_averages_top_four_and_sorts_ascending() {
        let scores = scores(&[(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0), (4, 0.5)]);
        let clusters = vec![cluster(0, &[0, 1, 2, 3]), cluster(1, &[4])];

        let ranked = rank_clusters(&scores, &clusters).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].cluster, 1);
        assert_eq!(ranked[0].mean_score, 0.5);
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[1].cluster, 0);
        assert_eq!(ranked[1].mean_score, 2.5);
    }

    #[test]
    fn rank_clusters_uses_only_first_four_members() {
        let scores = scores(&[(0, 1.0), (1, 1.0), (2, 1.0), (3, 1.0), (4, 100.0)]);
        let clusters = vec![cluster(7, &[0, 1, 2, 3, 4])];

        let ranked = rank_clusters(&scores, &clusters).unwrap();
        assert_eq!(ranked[0].mean_score, 1.0);
    }

    #[test]
    fn rank_clusters_breaks_ties_by_declaration_order() {
        let scores = scores(&[(0, 2.0), (1, 2.0)]);
        let clusters = vec![cluster(9, &[0]), cluster(3, &[1])];

        let ranked = rank_clusters(&scores, &clusters).unwrap();
        assert_eq!(ranked[0].cluster, 9);
        assert_eq!(ranked[1].cluster, 3);
    }

    #[test]
    fn rank_clusters_rejects_member_without_score() {
        let scores = scores(&[(0, 2.0)]);
        let clusters = vec![cluster(1, &[0, 5])];

        let result = rank_clusters(&scores, &clusters);
        assert!(matches!(
            result,
            Err(Error::MissingScore {
                cluster: 1,
                model: 5
            })
        ));
    }

    #[test]
    fn rank_clusters_rejects_empty_cluster() {
        let result = rank_clusters(&HashMap::new(), &[cluster(2, &[])]);
        assert!(matches!(result, Err(Error::EmptyCluster { cluster: 2 })));
    }
}
