//! Implementation of the `ripent apply` command.

use std::fs::{read_to_string, write};
use std::path::{Path, PathBuf};

use clap::Args;
use miette::{IntoDiagnostic, Report, Result, miette};
use ripent::{LoadError, Record, RuleSet, RuleSetError, upgrade_keys};
use tracing::{debug, info};

use crate::output::table::format_store_table;
use crate::output::{RuleDiagnostic, print_error, print_warning};

/// Arguments for the apply command.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Rule files, applied in the order given
    #[arg(long = "rules", short = 'r', required = true, num_args = 1..)]
    pub rules: Vec<PathBuf>,

    /// JSON file holding an array of records
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Where to write the resulting records. Defaults to stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Target name matched against `map` filters. Defaults to the input file stem.
    #[arg(long)]
    pub target: Option<String>,

    /// Skip rewriting legacy keys before the rules run
    #[arg(long)]
    pub no_upgrade: bool,

    /// Treat any warning as an error
    #[arg(long, env = "RIPENT_WARNINGS_AS_FATAL")]
    pub warnings_as_fatal: bool,

    /// Print the stored globals of every rule file afterwards
    #[arg(long)]
    pub print_store: bool,
}

/// Run the apply command.
pub fn run_apply(args: ApplyArgs) -> Result<i32> {
    let mut rules = match RuleSet::load(&args.rules) {
        Ok(rules) => rules,
        Err(LoadError::Io { path, source }) => {
            print_error(format!("cannot read {}: {source}", path.display()));
            return Ok(exitcode::NOINPUT);
        }
        Err(LoadError::Parse {
            path,
            content,
            error,
        }) => {
            let diagnostic = RuleDiagnostic::from_parse_error(&path, &content, &error);
            eprintln!("{:?}", Report::new(diagnostic));
            return Ok(exitcode::DATAERR);
        }
    };

    let content = match read_to_string(&args.input) {
        Ok(content) => content,
        Err(e) => {
            print_error(format!("cannot read {}: {e}", args.input.display()));
            return Ok(exitcode::NOINPUT);
        }
    };
    let mut records: Vec<Record> = match serde_json::from_str(&content) {
        Ok(records) => records,
        Err(e) => {
            print_error(format!(
                "{} is not a JSON array of string records: {e}",
                args.input.display()
            ));
            return Ok(exitcode::DATAERR);
        }
    };

    let target = target_name(args.target.as_deref(), &args.input);
    debug!(target = target.as_str(), records = records.len(), "loaded records");

    let mut warnings = 0;
    if !args.no_upgrade {
        let report = upgrade_keys(&mut records);
        if report.upgraded > 0 {
            info!(upgraded = report.upgraded, "upgraded legacy keys");
        }
        for warning in &report.warnings {
            print_warning(warning);
        }
        warnings += report.warnings.len();
    }

    let input_count = records.len();
    let (records, rule_warnings) = match rules.apply_with_warnings(&target, records) {
        Ok(result) => result,
        Err(RuleSetError::Rule { name, error, .. }) => {
            let path = Path::new(&name);
            let source = rules
                .iter()
                .find(|(file_name, _)| *file_name == name)
                .map(|(_, file)| file.source())
                .unwrap_or_default();
            let diagnostic = RuleDiagnostic::from_rule_error(path, source, &error);
            eprintln!("{:?}", Report::new(diagnostic));
            return Ok(exitcode::DATAERR);
        }
    };
    for warning in &rule_warnings {
        print_warning(warning);
    }
    warnings += rule_warnings.len();

    if args.warnings_as_fatal && warnings > 0 {
        print_error(format!("{warnings} warning(s) treated as fatal"));
        return Ok(exitcode::DATAERR);
    }

    info!(
        target = target.as_str(),
        files = rules.len(),
        input = input_count,
        output = records.len(),
        "applied rules"
    );

    let json = serde_json::to_string_pretty(&records).into_diagnostic()?;
    match &args.output {
        Some(path) => write(path, json + "\n")
            .map_err(|e| miette!("cannot write {}: {e}", path.display()))?,
        None => println!("{json}"),
    }

    if args.print_store {
        let rows = rules.iter().flat_map(|(name, file)| {
            file.store_entries()
                .map(move |(global, value)| (name, global, value))
        });
        eprintln!("{}", format_store_table(rows));
    }

    Ok(exitcode::OK)
}

/// The explicit target, or the input file's stem.
fn target_name(explicit: Option<&str>, input: &Path) -> String {
    match explicit {
        Some(target) => target.to_string(),
        None => input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn args(rules: &NamedTempFile, input: &NamedTempFile, output: &NamedTempFile) -> ApplyArgs {
        ApplyArgs {
            rules: vec![rules.path().to_path_buf()],
            input: input.path().to_path_buf(),
            output: Some(output.path().to_path_buf()),
            target: Some("c1a0".to_string()),
            no_upgrade: false,
            warnings_as_fatal: false,
            print_store: false,
        }
    }

    #[test]
    fn target_defaults_to_input_stem() {
        assert_eq!(target_name(None, Path::new("maps/c1a0.json")), "c1a0");
        assert_eq!(target_name(Some("c2a1"), Path::new("maps/c1a0.json")), "c2a1");
        assert_eq!(target_name(None, Path::new("")), "");
    }

    #[test]
    fn apply_writes_edited_records() {
        let rules = temp_file(
            "map c1a0 { match classname light; rename style pattern; add brightness 0.1 }",
        );
        let input = temp_file(
            r#"[{"classname": "light", "style": "2", "brightness": "0.2", "angle": "90"}]"#,
        );
        let output = NamedTempFile::new().unwrap();

        let code = run_apply(args(&rules, &input, &output)).unwrap();
        assert_eq!(code, exitcode::OK);

        let written: Vec<Record> =
            serde_json::from_str(&read_to_string(output.path()).unwrap()).unwrap();
        assert_eq!(written.len(), 1);
        let record = &written[0];
        assert_eq!(record.get("pattern"), Some("2"));
        assert_eq!(record.get("style"), None);
        assert_eq!(record.get("brightness"), Some("0.3"));
        assert_eq!(record.get("angles"), Some("0 90 0"));
        assert_eq!(record.get("angle"), None);
    }

    #[test]
    fn apply_skips_blocks_for_other_maps() {
        let rules = temp_file("map c2a1 { have classname; remove-entity }");
        let input = temp_file(r#"[{"classname": "light"}]"#);
        let output = NamedTempFile::new().unwrap();

        let code = run_apply(args(&rules, &input, &output)).unwrap();
        assert_eq!(code, exitcode::OK);
        let written: Vec<Record> =
            serde_json::from_str(&read_to_string(output.path()).unwrap()).unwrap();
        assert_eq!(written.len(), 1);
    }

    #[test]
    fn apply_reports_bad_input_as_data_error() {
        let rules = temp_file("{ have classname; remove-entity }");
        let input = temp_file(r#"{"classname": "light"}"#);
        let output = NamedTempFile::new().unwrap();

        let code = run_apply(args(&rules, &input, &output)).unwrap();
        assert_eq!(code, exitcode::DATAERR);
    }

    #[test]
    fn apply_reports_runtime_failure_as_data_error() {
        let rules = temp_file("{ have classname; add classname 1 }");
        let input = temp_file(r#"[{"classname": "light"}]"#);
        let output = NamedTempFile::new().unwrap();

        let code = run_apply(args(&rules, &input, &output)).unwrap();
        assert_eq!(code, exitcode::DATAERR);
    }

    #[test]
    fn fatal_warnings_stop_the_run() {
        let rules = temp_file("{ have classname; replace classname light }");
        let input = temp_file(r#"[{"classname": "light", "angle": "90", "angles": "0 0 0"}]"#);
        let output = NamedTempFile::new().unwrap();

        let mut args = args(&rules, &input, &output);
        args.warnings_as_fatal = true;
        assert_eq!(run_apply(args).unwrap(), exitcode::DATAERR);
    }
}
