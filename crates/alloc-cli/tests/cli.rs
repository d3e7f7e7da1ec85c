use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

fn product_table() -> NamedTempFile {
    write_fixture(
        "代码,批发价,卷烟名称,类,需求,可用货源,第一轮,第二轮\n\
         A001,200,示例甲,一类,100,100,0,0\n\
         A002,300,示例乙,一类,50,50,0,0\n",
    )
}

fn round_table() -> NamedTempFile {
    write_fixture(
        "指标,第一轮,第二轮\n\
         单箱均价上限,1000000,1000000\n\
         单箱均价下限,0,0\n\
         总量,100,50\n",
    )
}

#[test]
fn solve_writes_an_allocation_file_and_prints_a_summary() {
    let products = product_table();
    let rounds = round_table();
    let out_dir = tempdir().unwrap();
    let out = out_dir.path().join("allocation.json");

    let mut cmd = Command::cargo_bin("alloc-cli").unwrap();
    cmd.args([
        "solve",
        "--products",
        products.path().to_str().unwrap(),
        "--rounds",
        rounds.path().to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Allocation solve"));

    assert!(out.exists());
}

#[test]
fn validate_reports_pass_for_a_fully_allocated_solve_output() {
    let products = product_table();
    let rounds = round_table();
    let out_dir = tempdir().unwrap();
    let out = out_dir.path().join("allocation.json");

    Command::cargo_bin("alloc-cli")
        .unwrap()
        .args([
            "solve",
            "--products",
            products.path().to_str().unwrap(),
            "--rounds",
            rounds.path().to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    Command::cargo_bin("alloc-cli")
        .unwrap()
        .args([
            "validate",
            "--products",
            products.path().to_str().unwrap(),
            "--rounds",
            rounds.path().to_str().unwrap(),
            "--allocation",
            out.to_str().unwrap(),
        ])
        .assert()
        .stdout(predicate::str::contains("Validation:"));
}
