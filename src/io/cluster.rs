//! Parsers for the per-model score list and the cluster-membership listing.
//!
//! The score list holds one model per line with the score inside a
//! brace-delimited token; the 0-based line index is the model index, so lines
//! without a score token still consume an index. The membership listing
//! declares each cluster's member model indices in descending-quality order.

use crate::io::error::Error;
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

const FORMAT: &str = "cluster listing";

fn score_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\s(-?\d+\.?\d*)\s\}").expect("valid pattern"))
}

fn cluster_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Cluster\s+(\d+)\s+->\s+\d+\s+(.*)").expect("valid pattern"))
}

/// One cluster and its member model indices, in declared (file) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterMembers {
    pub id: u32,
    pub members: Vec<usize>,
}

/// Reads a score list: model index (line number, 0-based) → score.
pub fn read_scores<R: BufRead>(reader: R) -> Result<HashMap<usize, f64>, Error> {
    let mut scores = HashMap::new();
    let mut line_num = 0;

    for (model_idx, line) in reader.lines().enumerate() {
        line_num += 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;

        if let Some(caps) = score_regex().captures(&line) {
            let score = caps[1].parse::<f64>().map_err(|_| {
                Error::parse(
                    FORMAT,
                    None,
                    line_num,
                    format!("invalid score '{}'", &caps[1]),
                )
            })?;
            scores.insert(model_idx, score);
        }
    }

    Ok(scores)
}

/// Reads the cluster-membership listing (`Cluster <id> -> <count> <indices…>`).
pub fn read_clusters<R: BufRead>(reader: R) -> Result<Vec<ClusterMembers>, Error> {
    let mut clusters = Vec::new();
    let mut line_num = 0;

    for line in reader.lines() {
        line_num += 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;

        let Some(caps) = cluster_regex().captures(&line) else {
            continue;
        };

        let id = caps[1].parse::<u32>().map_err(|_| {
            Error::parse(
                FORMAT,
                None,
                line_num,
                format!("invalid cluster id '{}'", &caps[1]),
            )
        })?;

        let members = caps[2]
            .split_whitespace()
            .map(|token| {
                token.parse::<usize>().map_err(|_| {
                    Error::parse(
                        FORMAT,
                        None,
                        line_num,
                        format!("invalid model index '{token}'"),
                    )
                })
            })
            .collect::<Result<Vec<usize>, Error>>()?;

        clusters.push(ClusterMembers { id, members });
    }

    Ok(clusters)
}

pub fn read_scores_path(path: &Path) -> Result<HashMap<usize, f64>, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read_scores(BufReader::new(file)).map_err(|e| e.with_path(path))
}

pub fn read_clusters_path(path: &Path) -> Result<Vec<ClusterMembers>, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read_clusters(BufReader::new(file)).map_err(|e| e.with_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn scores_keyed_by_line_index() {
        let text = "\"complex_42.pdb\" { -120.5 }\n\"complex_17.pdb\" { 3.25 }\n";
        let scores = read_scores(Cursor::new(text)).unwrap();

        assert_eq!(scores.get(&0), Some(&-120.5));
        assert_eq!(scores.get(&1), Some(&3.25));
    }

    #[test]
    fn scores_skip_lines_without_token_but_consume_index() {
        let text = "header line\n\"complex_1.pdb\" { -10.0 }\n";
        let scores = read_scores(Cursor::new(text)).unwrap();

        assert_eq!(scores.get(&0), None);
        assert_eq!(scores.get(&1), Some(&-10.0));
    }

    #[test]
    fn scores_regex_gates_malformed_tokens() {
        let text = "{ not-a-number }\n";
        let scores = read_scores(Cursor::new(text)).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn clusters_parse_ids_and_members() {
        let text = "Cluster 2 -> 4 7 1 3 9\nCluster 12 -> 1 5\n";
        let clusters = read_clusters(Cursor::new(text)).unwrap();

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].id, 2);
        assert_eq!(clusters[0].members, vec![7, 1, 3, 9]);
        assert_eq!(clusters[1].id, 12);
        assert_eq!(clusters[1].members, vec![5]);
    }

    #[test]
    fn clusters_ignore_non_matching_lines() {
        let text = "# summary\nCluster 1 -> 2 0 1\ntrailer\n";
        let clusters = read_clusters(Cursor::new(text)).unwrap();
        assert_eq!(clusters.len(), 1);
    }
}
