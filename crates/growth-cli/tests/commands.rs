//! Integration tests for kidchart commands.

use clap::Parser;

use growth_cli::cli::{ChildCommand, Cli, Command, MeasureCommand};
use growth_cli::commands::{
    load_registry, run, run_age, run_chart, run_child_add, run_child_list, run_classify, run_curve,
    run_format_age, run_interpolate, run_measure_add, run_report, run_tables,
};
use growth_store::{ChildStore, MemoryStore};

fn parse(args: &[&str]) -> Command {
    let mut argv = vec!["kidchart"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("valid arguments").command
}

fn add_child(store: &mut MemoryStore) {
    let Command::Child(ChildCommand::Add(args)) = parse(&[
        "child", "add", "--name", "Sam", "--dob", "01/01/2024", "-g", "male",
    ]) else {
        panic!("expected child add");
    };
    assert_eq!(run_child_add(store, &args).unwrap(), "Added child c1 (Sam)");
}

fn add_measurement(store: &mut MemoryStore, args: &[&str]) -> String {
    let mut argv = vec!["measure", "add", "c1"];
    argv.extend_from_slice(args);
    let Command::Measure(MeasureCommand::Add(args)) = parse(&argv) else {
        panic!("expected measure add");
    };
    run_measure_add(store, &args).unwrap()
}

#[test]
fn age_and_format_age() {
    let Command::Age(args) = parse(&["age", "2024-01-15", "15/02/2024"]) else {
        panic!("expected age");
    };
    assert_eq!(run_age(&args), "31 days (1m 1d)");

    let Command::FormatAge(args) = parse(&["format-age", "395"]) else {
        panic!("expected format-age");
    };
    assert_eq!(run_format_age(&args), "1y 1m");
}

#[test]
fn classify_scenario() {
    let registry = load_registry(None).unwrap();
    let Command::Classify(args) = parse(&[
        "classify", "-m", "height", "-g", "male", "--age-days", "15", "52.3",
    ]) else {
        panic!("expected classify");
    };
    let output = run_classify(&registry, &args).unwrap();
    assert!(output == "25th-50th" || output == "50th-75th", "{output}");
}

#[test]
fn classify_from_dates_and_fallback() {
    let registry = load_registry(None).unwrap();
    let Command::Classify(args) = parse(&[
        "classify", "-m", "hc", "-g", "female", "-s", "NHS", "--dob", "2024-01-01", "--date",
        "2024-01-01", "1.0",
    ]) else {
        panic!("expected classify");
    };
    assert_eq!(
        run_classify(&registry, &args).unwrap(),
        "<3rd (WHO fallback)"
    );
}

#[test]
fn interpolate_and_curve() {
    let registry = load_registry(None).unwrap();
    let Command::Interpolate(args) = parse(&[
        "interpolate", "-m", "weight", "-g", "female", "-s", "nhs", "--age-days", "45",
    ]) else {
        panic!("expected interpolate");
    };
    let output = run_interpolate(&registry, &args).unwrap();
    assert!(output.starts_with("NHS weight (female) at 45 days (1m 15d)\n"));
    assert!(output.contains("99.6th"));

    let Command::Curve(args) = parse(&[
        "curve", "-m", "height", "-g", "male", "--step", "365", "--format", "json",
    ]) else {
        panic!("expected curve");
    };
    let json: serde_json::Value = serde_json::from_str(&run_curve(&registry, &args).unwrap()).unwrap();
    let ages: Vec<u64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["age"].as_u64().unwrap())
        .collect();
    assert_eq!(ages, vec![0, 365, 730]);
    assert_eq!(json[0]["values"]["50th"], 49.9);
}

#[test]
fn tables_lists_registered_tables() {
    let registry = load_registry(None).unwrap();
    let output = run_tables(&registry);
    assert!(output.contains("Head"));
    assert!(output.contains("0.4th"));
    assert!(output.contains("NHS"));
}

#[test]
fn missing_reference_dir_fails() {
    let err = load_registry(Some(std::path::Path::new("/nonexistent/kidchart-ref"))).unwrap_err();
    assert!(format!("{err:#}").contains("load reference tables"));
}

#[test]
fn child_workflow() {
    let registry = load_registry(None).unwrap();
    let mut store = MemoryStore::new();
    assert_eq!(run_child_list(&store).unwrap(), "No children recorded.");

    add_child(&mut store);
    assert_eq!(
        add_measurement(&mut store, &["--date", "2024-03-01", "--height", "58.0", "--weight", "5.6"]),
        "Recorded m1 for Sam at 2 months"
    );
    assert_eq!(
        add_measurement(&mut store, &["--date", "2024-01-31", "--hc", "36.5"]),
        "Recorded m2 for Sam at 1 month"
    );

    let list = store.load().unwrap();
    let child = list.get("c1").unwrap();
    let ids: Vec<&str> = child.measurements.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m2", "m1"]);
    assert!(run_child_list(&store).unwrap().contains("Sam"));

    let Command::Report(args) = parse(&["report", "c1", "-s", "NHS", "--format", "json"]) else {
        panic!("expected report");
    };
    let report: serde_json::Value =
        serde_json::from_str(&run_report(&registry, &store, &args).unwrap()).unwrap();
    let entries = report.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["measurement"], "headCircumference");
    assert_eq!(entries[0]["outcome"]["fallback"], true);
    assert_eq!(entries[0]["outcome"]["standard"], "WHO");
    assert_eq!(entries[1]["ageLabel"], "2 months");
    assert_eq!(entries[1]["outcome"]["fallback"], false);

    let Command::Chart(args) = parse(&["chart", "c1", "-m", "height"]) else {
        panic!("expected chart");
    };
    let chart: serde_json::Value =
        serde_json::from_str(&run_chart(&registry, &store, &args).unwrap()).unwrap();
    assert_eq!(chart["axis"], "months");
    assert_eq!(chart["points"].as_array().unwrap().len(), 1);
}

#[test]
fn measure_for_unknown_child_fails() {
    let mut store = MemoryStore::new();
    let Command::Measure(MeasureCommand::Add(args)) =
        parse(&["measure", "add", "c9", "--date", "2024-03-01", "--weight", "5.0"])
    else {
        panic!("expected measure add");
    };
    let err = run_measure_add(&mut store, &args).unwrap_err();
    assert!(err.to_string().contains("c9"));
}

#[test]
fn run_dispatches_against_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("children.json");
    let store = store.to_str().unwrap();
    let run_args = |args: &[&str]| {
        let mut argv = vec!["kidchart", "--store", store];
        argv.extend_from_slice(args);
        run(&Cli::try_parse_from(argv).expect("valid arguments"))
    };

    assert_eq!(run_args(&["format-age", "395"]).unwrap(), "1y 1m");
    assert!(run_args(&["tables"]).unwrap().contains("NHS"));
    assert_eq!(
        run_args(&["classify", "-m", "hc", "-g", "male", "-s", "NHS", "--age-days", "0", "1.0"])
            .unwrap(),
        "<3rd (WHO fallback)"
    );

    assert_eq!(
        run_args(&["child", "add", "--name", "Sam", "--dob", "2024-01-01", "-g", "male"]).unwrap(),
        "Added child c1 (Sam)"
    );
    run_args(&["measure", "add", "c1", "--date", "2024-03-01", "--height", "58.0"]).unwrap();
    assert!(run_args(&["report", "c1"]).unwrap().contains("Sam"));
    let chart: serde_json::Value =
        serde_json::from_str(&run_args(&["chart", "c1", "-m", "height"]).unwrap()).unwrap();
    assert_eq!(chart["points"].as_array().unwrap().len(), 1);
    assert!(dir.path().join("children.json").exists());

    let err = run_args(&["--reference-dir", "/nonexistent/kidchart-ref", "tables"]).unwrap_err();
    assert!(format!("{err:#}").contains("load reference tables"));
}
