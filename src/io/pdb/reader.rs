use crate::io::error::Error;
use crate::model::{
    atom::Atom,
    residue::Residue,
    structure::Structure,
    types::{Element, Point},
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

const FORMAT: &str = "PDB";

/// Reads a fixed-column coordinate file into a [`Structure`].
///
/// Only lines whose first four characters are `ATOM` are interpreted; headers,
/// footers, `HETATM` and everything else are ignored. Stable residue numbering
/// is assigned per chain in file order of first appearance: the counter starts
/// at 1 when a chain is first seen and increments on each new
/// `(chain, source_number)` pair, while repeat sightings only append atoms.
pub fn read<R: BufRead>(reader: R) -> Result<Structure, Error> {
    let mut structure = Structure::new();
    let mut line_num = 0;

    for line in reader.lines() {
        line_num += 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;

        if line.starts_with("ATOM") {
            parse_atom_record(&line, line_num, &mut structure)?;
        }
    }

    Ok(structure)
}

/// Opens and reads a coordinate file, attaching the path to any error.
pub fn read_path(path: &Path) -> Result<Structure, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read(BufReader::new(file)).map_err(|e| e.with_path(path))
}

fn parse_atom_record(
    line: &str,
    line_num: usize,
    structure: &mut Structure,
) -> Result<(), Error> {
    if line.len() < 54 {
        return Err(Error::parse(
            FORMAT,
            None,
            line_num,
            "Atom record too short",
        ));
    }

    let atom_name = line[12..16].trim().to_string();
    let res_name = line[17..20].trim().to_string();
    let chain_id = line.chars().nth(21).unwrap_or(' ').to_string();

    let source_number = line[22..26]
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::parse(FORMAT, None, line_num, "Invalid residue number"))?;

    let x = line[30..38]
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::parse(FORMAT, None, line_num, "Invalid X coordinate"))?;
    let y = line[38..46]
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::parse(FORMAT, None, line_num, "Invalid Y coordinate"))?;
    let z = line[46..54]
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::parse(FORMAT, None, line_num, "Invalid Z coordinate"))?;
    let pos = Point::new(x, y, z);

    let element_str = if line.len() >= 79 {
        line[77..79].trim()
    } else if line.len() > 77 {
        line[77..].trim()
    } else {
        ""
    };
    let element = if element_str.is_empty() {
        parse_element_from_name(&atom_name)
    } else {
        Element::from_str(element_str).unwrap_or(Element::Unknown)
    };

    let chain = structure.chain_or_insert(&chain_id);
    let atom = Atom::new(&atom_name, element, pos);

    match chain.residue_by_source_mut(source_number) {
        Some(residue) => residue.add_atom(atom),
        None => {
            let seq_id = chain.residue_count() + 1;
            let mut residue = Residue::new(seq_id, source_number, &res_name);
            residue.add_atom(atom);
            chain.add_residue(residue);
        }
    }

    Ok(())
}

fn parse_element_from_name(name: &str) -> Element {
    let mut symbol = String::new();
    for c in name.trim().chars() {
        if c.is_alphabetic() {
            symbol.push(c);
        } else if !symbol.is_empty() {
            break;
        }
    }

    if let Ok(el) = Element::from_str(&symbol) {
        return el;
    }
    if !symbol.is_empty() {
        if let Ok(el) = Element::from_str(&symbol[0..1]) {
            return el;
        }
    }

    Element::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn atom_line(name: &str, res: &str, chain: char, num: i32, x: f64, y: f64, z: f64) -> String {
        format!(
            "ATOM  {:>5} {:<4} {:<3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}           {:>2}",
            1, name, res, chain, num, x, y, z, 1.00, 0.00, "C"
        )
    }

    fn parse(lines: &[String]) -> Structure {
        let text = lines.join("\n");
        read(Cursor::new(text)).unwrap()
    }

    #[test]
    fn reader_assigns_contiguous_stable_indices_over_sparse_numbering() {
        let structure = parse(&[
            atom_line("N", "ALA", 'A', 10, 1.0, 2.0, 3.0),
            atom_line("CA", "ALA", 'A', 10, 1.5, 2.0, 3.0),
            atom_line("N", "GLY", 'A', 14, 4.0, 5.0, 6.0),
            atom_line("N", "SER", 'A', 15, 7.0, 8.0, 9.0),
        ]);

        let chain = structure.chain("A").unwrap();
        assert_eq!(chain.residue_count(), 3);
        let seq_ids: Vec<usize> = chain.iter_residues().map(|r| r.seq_id).collect();
        assert_eq!(seq_ids, vec![1, 2, 3]);
        assert_eq!(chain.seq_of_source(10), Some(1));
        assert_eq!(chain.seq_of_source(14), Some(2));
        assert_eq!(chain.seq_of_source(15), Some(3));
    }

    #[test]
    fn reader_restarts_stable_numbering_per_chain() {
        let structure = parse(&[
            atom_line("CA", "ALA", 'A', 5, 1.0, 2.0, 3.0),
            atom_line("CA", "GLY", 'A', 6, 4.0, 5.0, 6.0),
            atom_line("CA", "LYS", 'B', 6, 7.0, 8.0, 9.0),
        ]);

        assert_eq!(structure.chain_count(), 2);
        assert_eq!(structure.chain("B").unwrap().seq_of_source(6), Some(1));
        assert_eq!(structure.chain("A").unwrap().seq_of_source(6), Some(2));
    }

    #[test]
    fn reader_appends_atoms_to_existing_residue() {
        let structure = parse(&[
            atom_line("N", "ALA", 'A', 1, 1.0, 2.0, 3.0),
            atom_line("CA", "ALA", 'A', 1, 1.5, 2.0, 3.0),
            atom_line("C", "ALA", 'A', 1, 2.0, 2.0, 3.0),
        ]);

        let chain = structure.chain("A").unwrap();
        assert_eq!(chain.residue_count(), 1);
        assert_eq!(chain.residue(1).unwrap().atom_count(), 3);
    }

    #[test]
    fn reader_derives_sequence_with_fallback_for_unknown_names() {
        let structure = parse(&[
            atom_line("CA", "TRP", 'A', 1, 1.0, 2.0, 3.0),
            atom_line("FE", "HEM", 'A', 2, 4.0, 5.0, 6.0),
            atom_line("CA", "GLY", 'A', 3, 7.0, 8.0, 9.0),
        ]);

        assert_eq!(structure.chain("A").unwrap().sequence(), "WAG");
    }

    #[test]
    fn reader_ignores_non_atom_records() {
        let structure = parse(&[
            "HEADER    DOCKED COMPLEX".to_string(),
            "REMARK   1 generated".to_string(),
            atom_line("CA", "ALA", 'A', 1, 1.0, 2.0, 3.0),
            "HETATM    1  O   HOH A   2      1.000   2.000   3.000".to_string(),
            "END".to_string(),
        ]);

        assert_eq!(structure.chain_count(), 1);
        assert_eq!(structure.atom_count(), 1);
    }

    #[test]
    fn reader_rejects_malformed_coordinates() {
        let mut bad = atom_line("CA", "ALA", 'A', 1, 1.0, 2.0, 3.0);
        bad.replace_range(30..38, "  xx.yyy");
        let result = read(Cursor::new(bad));

        match result {
            Err(Error::Parse { details, .. }) => assert!(details.contains("X coordinate")),
            other => panic!("expected parse error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn reader_rejects_short_atom_records() {
        let result = read(Cursor::new("ATOM  incomplete"));
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn reader_is_deterministic_across_parses() {
        let lines = vec![
            atom_line("N", "ALA", 'A', 3, 1.0, 2.0, 3.0),
            atom_line("CA", "GLY", 'A', 7, 4.0, 5.0, 6.0),
            atom_line("CA", "LYS", 'B', 2, 7.0, 8.0, 9.0),
        ];
        let first = parse(&lines);
        let second = parse(&lines);

        for chain in first.iter_chains() {
            let other = second.chain(&chain.id).unwrap();
            assert_eq!(chain.auth_seq_map(), other.auth_seq_map());
        }
    }

    #[test]
    fn reader_parses_atom_fields_from_fixed_columns() {
        let structure = parse(&[atom_line("CA", "MET", 'A', 42, 11.25, -3.5, 0.125)]);

        let records = structure.atom_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "CA");
        assert_eq!(records[0].element, Element::C);
        assert_eq!(records[0].seq_id, 1);
        assert_eq!(records[0].x, 11.25);
        assert_eq!(records[0].y, -3.5);
        assert_eq!(records[0].z, 0.125);
    }
}
