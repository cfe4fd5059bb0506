//! Integration tests for the tierlist binary
//!
//! Tests the full stack: CSV loading, symmetrization, solving, reporting

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

// ============================================================================
// TEST FIXTURES
// ============================================================================

const ROSTER: &str = "name,fmove,cmove,cmove2\n\
                      alpha,Vine Whip,Frenzy Plant,Sludge Bomb\n\
                      beta,Bubble,Ice Beam,Play Rough\n\
                      gamma,Counter,Dynamic Punch,Ice Punch\n\
                      delta,Mud Shot,Earthquake,Stone Edge\n";

/// Raw battle scores: alpha, beta, gamma beat each other in a cycle and all
/// three beat delta. Scores are not antisymmetric until symmetrized; mirror
/// matches score zero.
const MATRIX: &str = "0,700,300,900\n\
                      300,0,700,900\n\
                      700,300,0,900\n\
                      100,100,100,0\n";

/// Scratch directory with both input files
fn fixture_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tierlist-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("pokemon_list.csv"), ROSTER).unwrap();
    fs::write(dir.join("matrix.csv"), MATRIX).unwrap();
    dir
}

fn tierlist(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tierlist"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run tierlist")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// FLAT MODE
// ============================================================================

#[test]
fn test_flat_text_report() {
    let dir = fixture_dir("flat-text");
    let output = tierlist(&["flat", "-d", dir.to_str().unwrap(), "-n", "3"]);
    assert!(output.status.success(), "{:?}", output);

    let text = stdout(&output);
    assert!(text.contains("\nTier 1\n"));
    assert!(text.contains("\nTier 2\n4: MS.E.SE Delta\t1.0\n"));
    assert!(!text.contains("Tier 3"));
    for label in ["1: VW.FP.SB Alpha", "2: B.IB.PR Beta", "3: C.DP.IP Gamma"] {
        assert!(text.contains(&format!("{}\t0.33333", label)), "{}", text);
    }
}

#[test]
fn test_smogon_alias_and_outfile() {
    let dir = fixture_dir("smogon-outfile");
    let outfile = dir.join("tiers.txt");
    let output = tierlist(&[
        "smogon",
        "--directory",
        dir.to_str().unwrap(),
        "--outfile",
        outfile.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).is_empty());

    let text = fs::read_to_string(&outfile).unwrap();
    assert!(text.starts_with("\nTier 1\n"));
    assert!(!text.contains("Delta"));
}

// ============================================================================
// DOMINANCE MODE
// ============================================================================

#[test]
fn test_dominance_json_report() {
    let dir = fixture_dir("dominance-json");
    let output = tierlist(&["dominator", "-d", dir.to_str().unwrap(), "-n", "3", "--json"]);
    assert!(output.status.success(), "{:?}", output);

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["mode"], "dominance");
    let first = value["tiers"][0]["members"].as_array().unwrap();
    assert_eq!(first.len(), 3);
    assert!(first.iter().all(|m| m["index"] != 3));
}

#[test]
fn test_dominance_text_has_dominator_section() {
    let dir = fixture_dir("dominance-text");
    let output = tierlist(&["dominance", "-d", dir.to_str().unwrap(), "-n", "2"]);
    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).contains("\nDominator Sets:\n"));
}

#[test]
fn test_dominance_parallel_flag_matches_default() {
    let dir = fixture_dir("dominance-parallel");
    let path = dir.to_str().unwrap();
    let sequential = tierlist(&["dominance", "-d", path, "-n", "3"]);
    let parallel = tierlist(&["dominance", "-d", path, "-n", "3", "--parallel"]);
    assert!(sequential.status.success(), "{:?}", sequential);
    assert!(parallel.status.success(), "{:?}", parallel);
    assert_eq!(stdout(&sequential), stdout(&parallel));
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_missing_directory_fails() {
    let output = tierlist(&["flat", "-d", "/definitely/not/a/tierlist/dir"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "{}", stderr);
}

#[test]
fn test_mismatched_matrix_fails() {
    let dir = fixture_dir("mismatch");
    fs::write(dir.join("matrix.csv"), "0,1\n-1,0\n").unwrap();
    let output = tierlist(&["flat", "-d", dir.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid tier input"), "{}", stderr);
    assert!(stderr.contains("roster has 4 strategies"), "{}", stderr);
}

#[test]
fn test_zero_tiers_rejected() {
    let dir = fixture_dir("zero-tiers");
    let output = tierlist(&["flat", "-d", dir.to_str().unwrap(), "-n", "0"]);
    assert!(!output.status.success());
}
