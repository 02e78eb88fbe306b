//! End-to-end loads through the public API over the CIF files in `data/`.

use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use cifxtal::io::cif::DataBlockSet;
use cifxtal::model::{known, LaueGroup};
use cifxtal::{load_crystal, read_crystal, CifError};

fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn forsterite_text() -> String {
    fs::read_to_string(data("forsterite.cif")).expect("forsterite fixture")
}

#[test]
fn forsterite_expands_to_41_sites() {
    let crystal = load_crystal(data("forsterite.cif")).unwrap();

    assert_eq!(crystal.name(), "Forsterite");
    assert_eq!(crystal.sites().len(), 41);
    assert_eq!(crystal.count_of(12), 9);
    assert_eq!(crystal.count_of(14), 8);
    assert_eq!(crystal.count_of(8), 24);

    let sg = crystal.space_group();
    assert_eq!(sg.index, 62);
    assert_eq!(sg.laue_group, LaueGroup::Mmm);
    assert_eq!(sg.laue_group.symbol(), "mmm");

    let cell = crystal.unit_cell();
    assert!((cell.a - 4.756).abs() < 1e-12);
    assert!((cell.b - 10.207).abs() < 1e-12);
    assert!((cell.c - 5.980).abs() < 1e-12);
    assert!((cell.alpha.to_degrees() - 90.0).abs() < 1e-9);
    assert!((cell.beta.to_degrees() - 91.0).abs() < 1e-9);
    assert!((cell.gamma.to_degrees() - 92.0).abs() < 1e-9);

    for site in crystal.sites() {
        for c in site.position() {
            assert!((0.0..1.0).contains(&c), "{:?} escapes the cell", site.position());
        }
    }
}

#[test]
fn rutile_expands_through_centring_translations() {
    let crystal = load_crystal(data("rutile.cif")).unwrap();

    assert_eq!(crystal.sites().len(), 6);
    assert_eq!(crystal.count_of(22), 2);
    assert_eq!(crystal.count_of(8), 4);
    assert_eq!(crystal.space_group().symbol, "P4_2/mnm");

    let has = |z: u8, p: [f64; 3]| {
        crystal.sites().iter().any(|s| {
            s.atomic_number() == z
                && s.position().iter().zip(p).all(|(a, b)| (a - b).abs() < 1e-9)
        })
    };
    // body centre from `-y+1/2, x+1/2, z+1/2`
    assert!(has(22, [0.5, 0.5, 0.5]));
    assert!(has(8, [0.6951, 0.6951, 0.0]));
    assert!(has(8, [0.1951, 0.8049, 0.5]));
    assert!(has(8, [0.8049, 0.1951, 0.5]));
}

#[test]
fn all_sites_are_distinct() {
    let crystal = load_crystal(data("forsterite.cif")).unwrap();
    let sites = crystal.sites();
    for (i, a) in sites.iter().enumerate() {
        for b in &sites[i + 1..] {
            assert!(!a.same_position(b));
        }
    }
}

#[test]
fn missing_cell_length_names_the_field() {
    let text = forsterite_text().replace("_cell_length_a 4.756\n", "");
    match read_crystal(text.as_bytes()) {
        Err(CifError::MissingField { block, field }) => {
            assert_eq!(block, "data_forsterite");
            assert_eq!(field, "_cell_length_a");
        }
        other => panic!("expected MissingField, got {:?}", other.map(|c| c.sites().len())),
    }
}

#[test]
fn two_part_operator_is_rejected() {
    let text = forsterite_text().replace("  -x,-y,z\n", "  -x,-y\n");
    match read_crystal(text.as_bytes()) {
        Err(CifError::MalformedSymmetryExpression { entry, parts, .. }) => {
            assert_eq!(entry, "-x,-y");
            assert_eq!(parts, 2);
        }
        other => panic!("expected MalformedSymmetryExpression, got {:?}", other.map(|c| c.sites().len())),
    }
}

#[test]
fn unreadable_file_is_an_io_error() {
    let err = load_crystal(data("no-such-file.cif")).unwrap_err();
    assert!(matches!(err, CifError::Io(_)));
}

struct BrokenRead;

impl std::io::Read for BrokenRead {
    fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "device went away"))
    }
}

#[test]
fn read_failure_midway_is_an_io_error() {
    let text = forsterite_text();
    let reader = BufReader::new(Read::chain(text.as_bytes(), BrokenRead));
    assert!(matches!(read_crystal(reader), Err(CifError::Io(_))));
}

#[test]
fn latin1_bytes_do_not_abort_the_load() {
    let mut bytes = b"# auteur: Andr\xe9 Dupont\n".to_vec();
    bytes.extend_from_slice(forsterite_text().as_bytes());
    let crystal = read_crystal(&bytes[..]).unwrap();
    assert_eq!(crystal.sites().len(), 41);
}

#[test]
fn empty_input_has_no_data_block() {
    let err = read_crystal(&b"# only a comment\n"[..]).unwrap_err();
    assert!(matches!(err, CifError::NoDataBlock));
}

#[test]
fn only_the_first_block_is_assembled() {
    let text = format!(
        "{}\n{}",
        fs::read_to_string(data("nickel.cif")).unwrap(),
        forsterite_text()
    );
    let set = DataBlockSet::parse_str(&text);
    assert_eq!(set.blocks().len(), 2);
    let crystal = read_crystal(text.as_bytes()).unwrap();
    assert_eq!(crystal.name(), "Nickel");
    assert_eq!(crystal.sites().len(), 4);
}

#[test]
fn registry_matches_the_files_on_disk() {
    for name in known::names() {
        let from_registry = known::load(name).unwrap();
        let from_disk = load_crystal(data(&format!("{}.cif", name))).unwrap();
        assert_eq!(from_registry.sites(), from_disk.sites());
        assert_eq!(from_registry.unit_cell(), from_disk.unit_cell());
    }
}

#[test]
fn copied_file_loads_from_a_temp_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Mg2SiO4.cif");
    fs::write(&path, forsterite_text()).unwrap();
    assert_eq!(load_crystal(&path).unwrap().sites().len(), 41);
}
