//! Command implementations.
//!
//! Each command returns the text to print so it can be tested without a
//! terminal. Reference-only commands never touch the child list.

use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info, info_span, trace};

use growth_core::{
    AssessmentOutcome, age_in_days, assess_child, assess_value, build_chart, curve, format_age,
    interpolate, measurement_for, resolve_table,
};
use growth_model::{
    AgeInDays, Child, MeasurementType, MeasurementValues, ReferenceTable, TableKey,
};
use growth_standards::{ReferenceRegistry, RegistryConfig, embedded_registry};
use growth_store::{ChildList, ChildStore, JsonFileStore};

use crate::cli::{
    AgeArgs, AgeInput, ChartArgs, ChildAddArgs, ChildCommand, ClassifyArgs, Cli, Command,
    CurveArgs, FormatAgeArgs, InterpolateArgs, MeasureAddArgs, MeasureCommand, OutputFormatArg,
    ReportArgs, TableArgs,
};
use crate::logging::redact;
use crate::render::{children_table, curve_table, report_table, row_table, tables_table};

/// Dispatch a parsed command line against the configured registry and store.
///
/// The registry is only loaded for commands that read reference tables.
pub fn run(cli: &Cli) -> Result<String> {
    let registry = || load_registry(cli.reference_dir.as_deref());
    let mut store = JsonFileStore::new(&cli.store);
    match &cli.command {
        Command::Age(args) => Ok(run_age(args)),
        Command::FormatAge(args) => Ok(run_format_age(args)),
        Command::Classify(args) => run_classify(&*registry()?, args),
        Command::Interpolate(args) => run_interpolate(&*registry()?, args),
        Command::Curve(args) => run_curve(&*registry()?, args),
        Command::Tables => Ok(run_tables(&*registry()?)),
        Command::Child(ChildCommand::Add(args)) => run_child_add(&mut store, args),
        Command::Child(ChildCommand::List) => run_child_list(&store),
        Command::Child(ChildCommand::Remove { id }) => run_child_remove(&mut store, id),
        Command::Measure(MeasureCommand::Add(args)) => run_measure_add(&mut store, args),
        Command::Measure(MeasureCommand::Remove { child, id }) => {
            run_measure_remove(&mut store, child, id)
        }
        Command::Report(args) => run_report(&*registry()?, &store, args),
        Command::Chart(args) => run_chart(&*registry()?, &store, args),
    }
}

/// Built-in tables, or tables read from `dir` when given.
pub fn load_registry(dir: Option<&Path>) -> Result<Cow<'static, ReferenceRegistry>> {
    match dir {
        None => Ok(Cow::Borrowed(
            embedded_registry().context("load built-in reference tables")?,
        )),
        Some(dir) => {
            let config = RegistryConfig::with_directory(Some(dir.to_path_buf()));
            let registry = ReferenceRegistry::load(&config)
                .with_context(|| format!("load reference tables from {}", dir.display()))?;
            Ok(Cow::Owned(registry))
        }
    }
}

pub fn run_age(args: &AgeArgs) -> String {
    let age = age_in_days(args.date_of_birth, args.date);
    format!("{} days ({})", age, format_age(age))
}

pub fn run_format_age(args: &FormatAgeArgs) -> String {
    format_age(AgeInDays::new(args.days))
}

pub fn run_tables(registry: &ReferenceRegistry) -> String {
    tables_table(registry).to_string()
}

pub fn run_classify(registry: &ReferenceRegistry, args: &ClassifyArgs) -> Result<String> {
    let table = &args.table;
    let age = resolve_age(&args.age)?;
    trace!(
        measurement = %table.measurement,
        age = age.days(),
        value = %redact(args.value),
        "classifying value"
    );
    let outcome = assess_value(
        registry,
        table.measurement,
        table.gender,
        table.standard,
        args.value,
        age,
    )?;
    if outcome == AssessmentOutcome::NoChart {
        bail!(no_chart(table));
    }
    Ok(outcome.to_string())
}

pub fn run_interpolate(registry: &ReferenceRegistry, args: &InterpolateArgs) -> Result<String> {
    let age = resolve_age(&args.age)?;
    let (reference, note) = resolve(registry, &args.table)?;
    let row = interpolate(age, reference)?;
    Ok(format!(
        "{} at {} days ({}){note}\n{}",
        reference.key(),
        age,
        format_age(age),
        row_table(reference, &row)
    ))
}

pub fn run_curve(registry: &ReferenceRegistry, args: &CurveArgs) -> Result<String> {
    let (reference, note) = resolve(registry, &args.table)?;
    let rows = curve(reference, args.step)?;
    match args.format {
        OutputFormatArg::Json => {
            serde_json::to_string_pretty(&rows).context("serialize curve")
        }
        OutputFormatArg::Table => Ok(format!(
            "{}{note}\n{}",
            reference.key(),
            curve_table(reference, &rows)
        )),
    }
}

pub fn run_child_add(store: &mut impl ChildStore, args: &ChildAddArgs) -> Result<String> {
    let mut list = load_list(store)?;
    let id = list.next_id("c");
    list.upsert(Child::new(&id, &args.name, args.dob, args.gender));
    store.save(&mut list).context("save child list")?;
    info!(child = %id, "added child");
    Ok(format!("Added child {id} ({})", args.name))
}

pub fn run_child_list(store: &impl ChildStore) -> Result<String> {
    let list = load_list(store)?;
    if list.is_empty() {
        return Ok("No children recorded.".to_string());
    }
    Ok(children_table(&list.children).to_string())
}

pub fn run_child_remove(store: &mut impl ChildStore, id: &str) -> Result<String> {
    let mut list = load_list(store)?;
    let child = list
        .remove(id)
        .ok_or_else(|| anyhow!("no child with id '{id}'"))?;
    store.save(&mut list).context("save child list")?;
    Ok(format!(
        "Removed child {id} ({}) and {} measurement(s)",
        child.name,
        child.measurements.len()
    ))
}

pub fn run_measure_add(store: &mut impl ChildStore, args: &MeasureAddArgs) -> Result<String> {
    let mut list = load_list(store)?;
    let id = list.next_id("m");
    let child = list.get_mut(&args.child)?;

    let values = MeasurementValues {
        height: args.height,
        weight: args.weight,
        head_circumference: args.head_circumference,
    };
    if values.is_empty() {
        bail!("no measurement values given");
    }
    for kind in MeasurementType::ALL {
        if let Some(value) = values.get(kind) {
            trace!(child = %child.id, measurement = %kind, value = %redact(value), "recording value");
        }
    }

    let measurement = measurement_for(child, &id, args.date, values);
    let age = measurement.age_in_days;
    child.add_measurement(measurement);
    let name = child.name.clone();
    store.save(&mut list).context("save child list")?;
    info!(measurement = %id, child = %args.child, "recorded measurement");
    Ok(format!("Recorded {id} for {name} at {}", format_age(age)))
}

pub fn run_measure_remove(store: &mut impl ChildStore, child: &str, id: &str) -> Result<String> {
    let mut list = load_list(store)?;
    list.get_mut(child)?
        .remove_measurement(id)
        .ok_or_else(|| anyhow!("child '{child}' has no measurement '{id}'"))?;
    store.save(&mut list).context("save child list")?;
    Ok(format!("Removed measurement {id}"))
}

pub fn run_report(
    registry: &ReferenceRegistry,
    store: &impl ChildStore,
    args: &ReportArgs,
) -> Result<String> {
    let _span = info_span!("report", child = %args.child, standard = %args.standard).entered();
    let list = load_list(store)?;
    let child = find_child(&list, &args.child)?;
    let assessments = assess_child(registry, child, args.standard)?;
    match args.format {
        OutputFormatArg::Json => {
            serde_json::to_string_pretty(&assessments).context("serialize report")
        }
        OutputFormatArg::Table if assessments.is_empty() => {
            Ok(format!("{} has no measurements.", child.name))
        }
        OutputFormatArg::Table => Ok(format!(
            "{} ({}, born {}), {} charts\n{}",
            child.name,
            child.gender,
            child.date_of_birth.to_display(),
            args.standard.label(),
            report_table(&assessments)
        )),
    }
}

pub fn run_chart(
    registry: &ReferenceRegistry,
    store: &impl ChildStore,
    args: &ChartArgs,
) -> Result<String> {
    let list = load_list(store)?;
    let child = find_child(&list, &args.child)?;
    let table = TableArgs {
        measurement: args.measurement,
        gender: child.gender,
        standard: args.standard,
    };
    let (reference, _) = resolve(registry, &table)?;
    let chart = build_chart(reference, &child.measurements)?;
    debug!(points = chart.points.len(), axis = chart.axis.unit(), "built chart");
    serde_json::to_string_pretty(&chart).context("serialize chart")
}

fn load_list(store: &impl ChildStore) -> Result<ChildList> {
    store.load().context("load child list")
}

fn find_child<'a>(list: &'a ChildList, id: &str) -> Result<&'a Child> {
    list.get(id).ok_or_else(|| anyhow!("no child with id '{id}'"))
}

fn resolve_age(input: &AgeInput) -> Result<AgeInDays> {
    match (input.age_days, input.dob, input.date) {
        (Some(days), _, _) => Ok(AgeInDays::new(days)),
        (None, Some(dob), Some(date)) => Ok(age_in_days(dob, date)),
        _ => bail!("give --age-days, or both --dob and --date"),
    }
}

/// Table for the request plus a note when WHO stood in for another standard.
fn resolve<'a>(
    registry: &'a ReferenceRegistry,
    table: &TableArgs,
) -> Result<(&'a ReferenceTable, &'static str)> {
    let resolved = resolve_table(registry, table.measurement, table.gender, table.standard)?
        .ok_or_else(|| anyhow!(no_chart(table)))?;
    let note = if resolved.fallback {
        " (WHO fallback)"
    } else {
        ""
    };
    Ok((resolved.table, note))
}

fn no_chart(table: &TableArgs) -> String {
    let key = TableKey::new(table.measurement, table.gender, table.standard);
    format!("no chart available for {key}")
}
