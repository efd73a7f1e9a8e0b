use crate::io::error::Error;
use crate::io::tbl::{AmbiguousRestraint, ResidueRef, UnambiguousRestraint};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

const FORMAT: &str = "restraint table";

/// Keyword opening a restraint directive line.
const DIRECTIVE: &str = "assign";

fn resid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"resid\s+(\d+)").expect("valid pattern"))
}

fn segid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"segid\s*(\w+)").expect("valid pattern"))
}

fn distances_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+\.?\d*)\s+(\d+\.?\d*)\s+(\d+\.?\d*)\s*$").expect("valid pattern")
    })
}

fn pair_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"resid\s*(\d+).*segid\s*(\w+)").expect("valid pattern"))
}

/// Parses the unambiguous (list-form) restraint dialect.
///
/// Every `assign` line yields exactly one restraint: two resid/segid pairs and
/// three trailing distance values (target, lower delta, upper delta). A
/// directive line missing any of these is a fatal parse error. Non-directive
/// lines are ignored.
pub fn read_unambiguous<R: BufRead>(reader: R) -> Result<Vec<UnambiguousRestraint>, Error> {
    let mut restraints = Vec::new();
    let mut line_num = 0;

    for line in reader.lines() {
        line_num += 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;

        if !line.starts_with(DIRECTIVE) {
            continue;
        }

        let resids: Vec<i32> = resid_regex()
            .captures_iter(&line)
            .filter_map(|c| c.get(1))
            .map(|m| parse_number::<i32>(m.as_str(), line_num))
            .collect::<Result<_, _>>()?;
        let segids: Vec<&str> = segid_regex()
            .captures_iter(&line)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();

        if resids.len() != 2 || segids.len() != 2 {
            return Err(Error::parse(
                FORMAT,
                None,
                line_num,
                format!(
                    "expected two resid/segid pairs, found {} resid and {} segid tokens",
                    resids.len(),
                    segids.len()
                ),
            ));
        }

        let caps = distances_regex().captures(&line).ok_or_else(|| {
            Error::parse(
                FORMAT,
                None,
                line_num,
                "missing trailing distance values (target, lower delta, upper delta)",
            )
        })?;
        let distance = parse_number::<f64>(&caps[1], line_num)?;
        let lower_delta = parse_number::<f64>(&caps[2], line_num)?;
        let upper_delta = parse_number::<f64>(&caps[3], line_num)?;

        restraints.push(UnambiguousRestraint {
            res_i: ResidueRef::new(resids[0], segids[0]),
            res_j: ResidueRef::new(resids[1], segids[1]),
            distance,
            lower_delta,
            upper_delta,
        });
    }

    Ok(restraints)
}

/// Parses the ambiguous (active/passive grouped) restraint dialect.
///
/// A directive line opens a new group keyed by its first resid/segid pair;
/// each following non-directive line matching the pair pattern is appended as
/// a passive member of the currently open group. A passive line before any
/// directive is a fatal consistency error, never silently dropped.
pub fn read_ambiguous<R: BufRead>(reader: R) -> Result<Vec<AmbiguousRestraint>, Error> {
    let mut groups: Vec<AmbiguousRestraint> = Vec::new();
    let mut line_num = 0;

    for line in reader.lines() {
        line_num += 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;

        if line.starts_with(DIRECTIVE) {
            let caps = pair_regex().captures(&line).ok_or_else(|| {
                Error::parse(
                    FORMAT,
                    None,
                    line_num,
                    "directive line has no resid/segid pair",
                )
            })?;
            let resid = parse_number::<i32>(&caps[1], line_num)?;
            groups.push(AmbiguousRestraint {
                active: ResidueRef::new(resid, &caps[2]),
                passive: Vec::new(),
            });
        } else if let Some(caps) = pair_regex().captures(&line) {
            let resid = parse_number::<i32>(&caps[1], line_num)?;
            let passive = ResidueRef::new(resid, &caps[2]);
            match groups.last_mut() {
                Some(group) => group.passive.push(passive),
                None => {
                    return Err(Error::inconsistent_data(
                        FORMAT,
                        None,
                        format!(
                            "passive residue line {} appears before any '{}' directive",
                            line_num, DIRECTIVE
                        ),
                    ));
                }
            }
        }
    }

    Ok(groups)
}

pub fn read_unambiguous_path(path: &Path) -> Result<Vec<UnambiguousRestraint>, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read_unambiguous(BufReader::new(file)).map_err(|e| e.with_path(path))
}

pub fn read_ambiguous_path(path: &Path) -> Result<Vec<AmbiguousRestraint>, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read_ambiguous(BufReader::new(file)).map_err(|e| e.with_path(path))
}

fn parse_number<T: std::str::FromStr>(token: &str, line_num: usize) -> Result<T, Error> {
    token
        .parse::<T>()
        .map_err(|_| Error::parse(FORMAT, None, line_num, format!("invalid number '{token}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn unambiguous_line_yields_one_restraint() {
        let tbl = "assign (resid 128 and segid A) (resid 20 and segid B) 5.0 1.0 2.0\n";
        let restraints = read_unambiguous(Cursor::new(tbl)).unwrap();

        assert_eq!(restraints.len(), 1);
        let r = &restraints[0];
        assert_eq!(r.res_i, ResidueRef::new(128, "A"));
        assert_eq!(r.res_j, ResidueRef::new(20, "B"));
        assert_eq!(r.distance, 5.0);
        assert_eq!(r.bounds(), (4.0, 7.0));
    }

    #[test]
    fn unambiguous_ignores_non_directive_lines() {
        let tbl = "! comment\n\nassign (resid 1 and segid A) (resid 2 and segid B) 3.0 0.5 0.5\n";
        let restraints = read_unambiguous(Cursor::new(tbl)).unwrap();
        assert_eq!(restraints.len(), 1);
    }

    #[test]
    fn unambiguous_preserves_encounter_order() {
        let tbl = "assign (resid 1 and segid A) (resid 2 and segid B) 3.0 0.5 0.5\n\
                   assign (resid 9 and segid B) (resid 4 and segid A) 6.0 1.0 1.0\n";
        let restraints = read_unambiguous(Cursor::new(tbl)).unwrap();

        assert_eq!(restraints[0].res_i.resid, 1);
        assert_eq!(restraints[1].res_i.resid, 9);
    }

    #[test]
    fn unambiguous_directive_without_distances_fails() {
        let tbl = "assign (resid 1 and segid A) (resid 2 and segid B)\n";
        let result = read_unambiguous(Cursor::new(tbl));
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn unambiguous_directive_with_one_pair_fails() {
        let tbl = "assign (resid 1 and segid A) 3.0 0.5 0.5\n";
        let result = read_unambiguous(Cursor::new(tbl));
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn ambiguous_groups_passives_under_open_directive() {
        let tbl = "assign ( resid 10 and segid A)\n\
                   (\n\
                    ( resid 20 and segid B)\n\
                 or\n\
                    ( resid 21 and segid B)\n\
                   ) 2.0 2.0 0.0\n";
        let groups = read_ambiguous(Cursor::new(tbl)).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].active, ResidueRef::new(10, "A"));
        assert_eq!(
            groups[0].passive,
            vec![ResidueRef::new(20, "B"), ResidueRef::new(21, "B")]
        );
    }

    #[test]
    fn ambiguous_new_directive_closes_previous_group() {
        let tbl = "assign ( resid 10 and segid A)\n\
                    ( resid 20 and segid B)\n\
                   assign ( resid 11 and segid A)\n\
                    ( resid 30 and segid B)\n";
        let groups = read_ambiguous(Cursor::new(tbl)).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].passive, vec![ResidueRef::new(20, "B")]);
        assert_eq!(groups[1].active.resid, 11);
        assert_eq!(groups[1].passive, vec![ResidueRef::new(30, "B")]);
    }

    #[test]
    fn ambiguous_passive_before_any_directive_is_an_error() {
        let tbl = "( resid 20 and segid B)\nassign ( resid 10 and segid A)\n";
        let result = read_ambiguous(Cursor::new(tbl));
        assert!(matches!(result, Err(Error::InconsistentData { .. })));
    }

    #[test]
    fn ambiguous_ignores_lines_without_pairs() {
        let tbl = "assign ( resid 10 and segid A)\n(\nor\n) 2.0 2.0 0.0\n";
        let groups = read_ambiguous(Cursor::new(tbl)).unwrap();
        assert_eq!(groups.len(), 1);
        assert!(groups[0].passive.is_empty());
    }
}
