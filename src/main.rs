mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use skill_inspector::{
    artifact::SkillArtifact, checkers, config, engine, finding::InspectionReport, output,
};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            path,
            format,
            output: output_path,
            timeout,
            config: config_path,
        } => {
            if !path.exists() {
                eprintln!("Error: path does not exist: {}", path.display());
                std::process::exit(2);
            }

            let config = load_config(config_path.as_deref(), timeout);

            let artifact = SkillArtifact::from_dir(&path).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });

            let report = inspect(&artifact, &config).await;
            let formatted = output::format_report(&report, &format);

            if let Some(out_path) = output_path {
                std::fs::write(&out_path, &formatted).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {e}");
                    std::process::exit(2);
                });
                eprintln!("Output written to {}", out_path.display());
            } else {
                print!("{formatted}");
            }

            let passed = report.score >= config.inspection.fail_threshold;
            std::process::exit(if passed { 0 } else { 1 });
        }

        Commands::InspectAll {
            path,
            format,
            timeout,
            config: config_path,
        } => {
            if !path.exists() {
                eprintln!("Error: path does not exist: {}", path.display());
                std::process::exit(2);
            }

            let skill_dirs = find_skill_dirs(&path);
            if skill_dirs.is_empty() {
                eprintln!(
                    "Error: no skill directories found in '{}' (no subdirectory contains a SKILL.md)",
                    path.display()
                );
                std::process::exit(2);
            }

            let config = load_config(config_path.as_deref(), timeout);

            let mut reports: Vec<InspectionReport> = Vec::new();
            for skill_dir in &skill_dirs {
                let artifact = match SkillArtifact::from_dir(skill_dir) {
                    Ok(a) => a,
                    Err(e) => {
                        eprintln!("Skipping {}: {e}", skill_dir.display());
                        continue;
                    }
                };
                let report = inspect(&artifact, &config).await;
                let formatted = output::format_report(&report, &format);
                print!("{formatted}");
                reports.push(report);
            }

            if matches!(format, output::OutputFormat::Pretty) {
                print!(
                    "{}",
                    format_collection_summary(&path, &reports, config.inspection.fail_threshold)
                );
            }

            let all_passed = reports
                .iter()
                .all(|r| r.score >= config.inspection.fail_threshold);
            std::process::exit(if all_passed { 0 } else { 1 });
        }

        Commands::ListRules => {
            let rules = skill_inspector::all_rules();
            println!("{}", "Built-in Rules".bold().underline());
            println!();

            let mut current_source = "";
            for rule in &rules {
                if rule.source != current_source {
                    if !current_source.is_empty() {
                        println!();
                    }
                    println!("  {}", rule.source.bold());
                    current_source = rule.source;
                }

                let severity = colorize_severity(rule.severity);
                println!(
                    "    [{severity}] {id:<34} {message}",
                    id = rule.id,
                    message = rule.message,
                );
            }

            println!();
            println!("  Total: {} rules", rules.len());
        }

        Commands::Explain { rule_id } => {
            let rules = skill_inspector::all_rules();
            match rules.iter().find(|r| r.id == rule_id) {
                Some(rule) => {
                    println!("{}", rule.id.bold());
                    println!();
                    println!("  Source:       {}", rule.source);
                    println!("  Severity:     {}", rule.severity);
                    println!("  Description:  {}", rule.message);
                    println!("  Fix:          {}", rule.fix);
                }
                None => {
                    eprintln!("Unknown rule: {rule_id}");
                    eprintln!("Use 'skill-inspector list-rules' to see all available rules.");
                    std::process::exit(2);
                }
            }
        }
    }
}

/// Loads the config, applies the CLI timeout override, and exits with code 2
/// on any config error so inspection never starts misconfigured.
fn load_config(config_path: Option<&Path>, timeout_override: Option<u64>) -> config::Config {
    let mut config = config::Config::load(config_path).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(2);
    });
    if let Some(secs) = timeout_override {
        if secs == 0 {
            eprintln!("Error: --timeout must be greater than zero");
            std::process::exit(2);
        }
        config.inspection.timeout_secs = secs;
    }
    config
}

async fn inspect(artifact: &SkillArtifact, config: &config::Config) -> InspectionReport {
    let registered = checkers::builtin_checkers(config);
    engine::run_inspection(artifact, &registered, config.per_check_timeout())
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(2);
        })
}

fn colorize_severity(severity: skill_inspector::finding::Severity) -> String {
    use skill_inspector::finding::Severity;
    match severity {
        Severity::Critical => "CRIT".red().bold().to_string(),
        Severity::High => "HIGH".red().to_string(),
        Severity::Medium => " MED".yellow().bold().to_string(),
        Severity::Low => " LOW".blue().to_string(),
    }
}

/// Returns immediate child directories of `path` that contain a `SKILL.md`
/// file, sorted alphabetically by directory name.
fn find_skill_dirs(path: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(path) else {
        return vec![];
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| p.join(skill_inspector::artifact::ENTRY_FILE).exists())
        .collect();

    dirs.sort();
    dirs
}

/// Renders a compact summary table after all individual reports have been printed.
fn format_collection_summary(
    collection_path: &Path,
    reports: &[InspectionReport],
    fail_threshold: u32,
) -> String {
    let mut out = String::new();
    let separator = "─".repeat(54);

    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        format!(
            "  Collection Summary: {}  ({} skills)",
            collection_path.display(),
            reports.len()
        )
        .bold()
        .underline()
    ));
    out.push_str(&format!("{}\n", separator.dimmed()));

    let mut n_failed = 0usize;
    let mut n_incomplete = 0usize;
    let mut n_passed = 0usize;

    for report in reports {
        let (icon, status_str) = if report.score < fail_threshold {
            n_failed += 1;
            ("✗".red().to_string(), "FAILED ".red().bold().to_string())
        } else if report.incomplete {
            n_incomplete += 1;
            (
                "⚠".yellow().to_string(),
                "PARTIAL".yellow().bold().to_string(),
            )
        } else {
            n_passed += 1;
            (
                "✓".green().to_string(),
                "PASSED ".green().bold().to_string(),
            )
        };

        let score_col = match report.score_range {
            Some(range) => format!("{}..{}", range.min, range.max),
            None => report.score.to_string(),
        };
        out.push_str(&format!(
            "  {icon}  {name:<22} {status}  score {score_col}\n",
            name = report.skill,
            status = status_str,
        ));
    }

    out.push_str(&format!("{}\n", separator.dimmed()));
    out.push_str(&format!(
        "  Total: {}  {}  {}\n",
        format!("{} failed", n_failed).red().bold(),
        format!("{} partial", n_incomplete).yellow().bold(),
        format!("{} passed", n_passed).green().bold(),
    ));

    out
}
