use std::{
    fs, io,
    path::{Path, PathBuf},
};

use hex_literal::hex;
use sha2::{Digest, Sha256};
// cargo run --bin vcffuse -- --vcf tests/data/fusions.vcf --annotations tests/data/ensembl \
//     --svg fusions.svg --bed fusions.bed
use vcffuse::{
    fusion::{Direction, FusionKind},
    intervals::{Interval, IntervalSet},
    io::{bed, json::EnsemblJsonCache, vcf},
    run,
    sv::SvType,
    write_pictures,
};

const TEST_DATA_DIR: &str = "./tests/data/";
const VCF_FILE: &str = "fusions.vcf";
const ENSEMBL_DIR: &str = "ensembl";

fn sha256_file_digest<P: AsRef<Path>>(path: P) -> Vec<u8> {
    let display = path.as_ref().display();
    let mut file = fs::File::open(&path).expect(&format!("Failed to open file: {display}"));
    let mut hasher = Sha256::new();
    _ = io::copy(&mut file, &mut hasher).expect(&format!("Failed to read from file: {display}"));
    hasher.finalize().to_vec()
}

fn set(pairs: &[(i64, i64)]) -> IntervalSet {
    pairs.iter().copied().map(Interval::from).collect()
}

fn output_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vcffuse_{name}_{}", std::process::id()));
    fs::create_dir_all(&dir).expect("Failed to create output directory");
    dir
}

#[test]
/// Check the input files used for integration tests.
/// If this test fails, it means one or more of the input files have changed.
/// This is a problem if tests are not updated to reflect the new input files.
fn check_input_files() {
    // Check VCF with SV calls
    let path = Path::new(TEST_DATA_DIR).join(VCF_FILE);
    let expect = hex!("6b1c7db6b5cea26bb57f69b01b92f053b2f37c870d5bea0118cc164879812231");
    assert_eq!(sha256_file_digest(path)[..], expect[..]);

    // Check Ensembl gene models
    let ensembl = Path::new(TEST_DATA_DIR).join(ENSEMBL_DIR);
    let expected = [
        (
            "ENSG00000000001",
            hex!("d26ab7e81c0ee02ebeb1d5e6767fc8b37bf67f95615b19a782f73d4a809a3dfe"),
        ),
        (
            "ENSG00000000002",
            hex!("1ea6d2a1b5d34e621df21b6c3edef3fb8524c711ff67b995e4fe2eda137d1134"),
        ),
        (
            "ENSG00000000003",
            hex!("f0d394b0d4cf821d307bf265b38cf8ecf8e8b07092361407005a4fca1b73c1f5"),
        ),
        (
            "ENSG00000000004",
            hex!("0de68e1512d5e3e4d08b9bec09fa3f5ed7385e9c652be1efe14f531a3bdc0ac4"),
        ),
        (
            "ENSG00000000007",
            hex!("dad71a512c6df362a9b6824827d0247e14d048b8d6949ad6ce383a035bda0755"),
        ),
        (
            "ENSG00000000008",
            hex!("18fb38f9453d24a3a3a6bc37a44922d1409c2728498de1a3b3aa523162e9dfff"),
        ),
        (
            "ENST00000000005",
            hex!("403dc20ae996a9a5be311b2c294a0e16e7b6152fd861baaa005e04d7c3049a17"),
        ),
        (
            "ENST00000000006",
            hex!("7b173898db330bf134a6d4d36a6b45438cf5bb5949b7232de210a248fe137bb4"),
        ),
    ];
    for (id, expect) in expected {
        let path = ensembl.join(format!("{id}.json"));
        assert_eq!(sha256_file_digest(path)[..], expect[..], "{id}");
    }
}

#[test]
fn read_passing_fusion_calls() {
    let calls = vcf::read_sv_calls(Path::new(TEST_DATA_DIR).join(VCF_FILE)).unwrap();

    let types: Vec<SvType> = calls.iter().map(|c| c.sv_type).collect();
    assert_eq!(
        vec![
            SvType::Deletion,
            SvType::Breakend,
            SvType::Inversion,
            SvType::TandemDuplication,
            SvType::Breakend
        ],
        types
    );

    let del = &calls[0];
    assert_eq!("MantaDEL:1:0:1:0:0:0", del.id);
    assert_eq!("chr1", del.chromosome);
    assert_eq!(1450, del.position);
    assert_eq!(Some(3000), del.end);
    assert_eq!(None, del.mate_id);
    assert_eq!(
        Some(("ENSG00000000001", "ENSG00000000002")),
        del.annotations[0].gene_pair()
    );

    let bnd = &calls[1];
    assert_eq!("G]chr5:30250]", bnd.alt);
    assert_eq!(None, bnd.end);
    assert_eq!(Some("MantaBND:1:0:1:0:0:0:1"), bnd.mate_id.as_deref());
}

#[test]
fn run_all_fusions() {
    let source = EnsemblJsonCache::new(Path::new(TEST_DATA_DIR).join(ENSEMBL_DIR));
    let fusions = run(Path::new(TEST_DATA_DIR).join(VCF_FILE), &source).unwrap();

    let names: Vec<(&str, &str)> = fusions
        .iter()
        .map(|f| (f.prime5_name.as_str(), f.prime3_name.as_str()))
        .collect();
    assert_eq!(
        vec![
            ("GENEA", "GENEB"),
            ("GENEC", "GENED"),
            ("GENED", "GENEC"),
            ("GENEH", "GENEG"),
            ("GENEE-201", "GENEF-201"),
        ],
        names
    );

    // deletion, rotated
    assert_eq!(FusionKind::Deletion, fusions[0].kind);
    assert_eq!(set(&[(451, 501), (601, 901)]), fusions[0].layout.prime5);
    assert_eq!(set(&[(250, 450), (449, 450)]), fusions[0].layout.prime3);

    // inversion, both hypotheses
    assert_eq!(set(&[(0, 300), (400, 450)]), fusions[1].layout.prime5);
    assert_eq!(set(&[(450, 500), (600, 700)]), fusions[1].layout.prime3);
    assert_eq!(set(&[(0, 50), (49, 50)]), fusions[2].layout.prime5);
    assert_eq!(set(&[(50, 51), (50, 100)]), fusions[2].layout.prime3);

    // tandem duplication, rotated
    assert_eq!(FusionKind::TandemDuplication, fusions[3].kind);
    assert_eq!(set(&[(251, 301), (401, 501)]), fusions[3].layout.prime5);
    assert_eq!(set(&[(200, 250), (249, 250)]), fusions[3].layout.prime3);

    // antiparallel breakends joined B]mate]
    assert_eq!("MantaBND:1:0:1:0:0:0:1", fusions[4].label);
    assert_eq!(
        FusionKind::Translocation(Direction::Left, Direction::Left),
        fusions[4].kind
    );
    assert_eq!(set(&[(0, 300), (400, 500)]), fusions[4].layout.prime5);
    assert_eq!(set(&[(500, 550), (650, 750)]), fusions[4].layout.prime3);
}

#[test]
fn run_with_missing_gene_models() {
    // no gene models at all: every call is skipped, the run itself succeeds
    let source = EnsemblJsonCache::new(output_dir("empty_cache"));
    let fusions = run(Path::new(TEST_DATA_DIR).join(VCF_FILE), &source).unwrap();
    assert!(fusions.is_empty());
}

#[test]
fn write_pictures_and_layouts() {
    let source = EnsemblJsonCache::new(Path::new(TEST_DATA_DIR).join(ENSEMBL_DIR));
    let fusions = run(Path::new(TEST_DATA_DIR).join(VCF_FILE), &source).unwrap();

    let out = output_dir("pictures");
    let pictures = write_pictures(&fusions, out.join("fusions.svg")).unwrap();
    assert_eq!(5, pictures.len());
    assert_eq!(out.join("0_GENEA_GENEB-fusions.svg"), pictures[0]);
    assert_eq!(out.join("4_GENEE-201_GENEF-201-fusions.svg"), pictures[4]);
    for picture in &pictures {
        let svg = fs::read_to_string(picture).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("fill=\"blue\""));
        assert!(svg.contains("fill=\"red\""));
    }

    let bed_path = out.join("fusions.bed");
    bed::write_layouts(&bed_path, &fusions).unwrap();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_path(&bed_path)
        .unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    let n_exons: usize = fusions
        .iter()
        .map(|f| f.layout.prime5.len() + f.layout.prime3.len())
        .sum();
    assert_eq!(n_exons, rows.len());
    assert_eq!(
        vec!["MantaDEL:1:0:1:0:0:0", "451", "501", "5p", "GENEA"],
        rows[0].iter().collect::<Vec<&str>>()
    );

    fs::remove_dir_all(out).unwrap();
}
