use std::collections::BTreeMap;
use std::path::PathBuf;

use ad_applicability::config::AppConfig;
use ad_applicability::directives::{
    all_passed, verify_result, AdDocument, AircraftConfiguration, ApplicabilityEvaluator,
    ApplicabilityRules, DirectiveStore, EvaluationResult, ExemptingModification,
    FileDirectiveStore, FleetImporter, MsnConstraint, VerificationResult,
};
use ad_applicability::error::AppError;
use clap::Args;
use serde_json::json;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Fleet roster CSV with Aircraft Model, MSN, Modifications Applied columns
    #[arg(long)]
    pub(crate) fleet: PathBuf,
    /// Directory of parsed directive JSON documents (defaults to AD_LIBRARY_DIR)
    #[arg(long)]
    pub(crate) library: Option<PathBuf>,
    /// Emit the raw evaluation results as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Emit the demo results as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        fleet,
        library,
        json,
    } = args;

    let aircraft = FleetImporter::from_path(&fleet)?;
    let directory = match library {
        Some(path) => path,
        None => AppConfig::load()?.library.directive_dir,
    };
    let directives = FileDirectiveStore::new(&directory).list()?;

    let evaluator = ApplicabilityEvaluator::new();
    let results: Vec<EvaluationResult> = aircraft
        .iter()
        .map(|configuration| evaluator.evaluate_against_all(configuration, &directives))
        .collect();

    if json {
        print_json(&json!({ "evaluation_results": results }))?;
    } else {
        println!(
            "Evaluated {} aircraft against {} directive(s) from {}",
            results.len(),
            directives.len(),
            directory.display()
        );
        render_evaluations(&results);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let directives = sample_directives();
    let evaluator = ApplicabilityEvaluator::new();

    let fleet_results: Vec<EvaluationResult> = demo_fleet()
        .iter()
        .map(|aircraft| evaluator.evaluate_against_all(aircraft, &directives))
        .collect();

    let reports: Vec<VerificationResult> = verification_fleet()
        .into_iter()
        .map(|(aircraft, expected)| {
            let evaluation = evaluator.evaluate_against_all(&aircraft, &directives);
            verify_result(&evaluation, &expected)
        })
        .collect();
    let passed = all_passed(&reports);

    if args.json {
        print_json(&json!({
            "fleet_results": fleet_results,
            "verification_results": reports,
            "all_verification_passed": passed,
        }))?;
        return Ok(());
    }

    println!("Airworthiness Directive applicability demo");
    let ids: Vec<&str> = directives
        .iter()
        .map(|directive| directive.ad_id.as_str())
        .collect();
    println!("Directives: {}", ids.join(", "));

    println!("\nFleet verdicts");
    render_evaluations(&fleet_results);

    println!("\nVerification against expected verdicts");
    for report in &reports {
        println!(
            "- {} (MSN {})",
            report.aircraft.aircraft_model,
            format_msn(report.aircraft.msn)
        );
        for key in &report.results {
            println!(
                "    {}: affected={} expected={} pass={}",
                key.ad_id, key.is_affected, key.expected, key.pass_check
            );
        }
    }

    println!("\nAll verification checks passed: {passed}");
    Ok(())
}

fn render_evaluations(results: &[EvaluationResult]) {
    for result in results {
        println!(
            "- {} (MSN {})",
            result.aircraft.aircraft_model,
            format_msn(result.aircraft.msn)
        );
        for key in &result.results {
            let verdict = if key.is_affected {
                "AFFECTED"
            } else {
                "not affected"
            };
            println!("    {}: {} ({})", key.ad_id, verdict, key.reason);
        }
    }
}

fn format_msn(msn: Option<u32>) -> String {
    match msn {
        Some(value) => value.to_string(),
        None => "unknown".to_string(),
    }
}

fn print_json(value: &serde_json::Value) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
    println!("{rendered}");
    Ok(())
}

/// Two representative directives: an FAA note covering the MD-11/MD-10 family
/// with an MSN window, and an EASA note over the A320 family with
/// model-scoped modification exemptions.
pub(crate) fn sample_directives() -> Vec<AdDocument> {
    vec![
        AdDocument {
            ad_id: "FAA-2025-23-53".to_string(),
            title: Some("Fuselage frame inspection".to_string()),
            effective_date: None,
            applicability_rules: ApplicabilityRules {
                aircraft_models: vec![
                    "MD-11".to_string(),
                    "MD-11F".to_string(),
                    "MD-10-10F".to_string(),
                    "MD-10-30F".to_string(),
                ],
                msn_constraints: Some(MsnConstraint {
                    min_msn: Some(46000),
                    max_msn: Some(48999),
                    exclude_msns: None,
                    include_msns: None,
                }),
                required_modifications: vec![
                    "Inspect fuselage frames per SB MD11-53A082".to_string()
                ],
                additional_conditions: None,
                ..ApplicabilityRules::default()
            },
            raw_applicability_text: Some(
                "This AD applies to McDonnell Douglas Model MD-11, MD-11F, MD-10-10F, and \
                 MD-10-30F airplanes, manufacturer serial numbers 46000 through 48999."
                    .to_string(),
            ),
        },
        AdDocument {
            ad_id: "EASA-2025-0254R1".to_string(),
            title: Some("Wing top skin reinforcement".to_string()),
            effective_date: None,
            applicability_rules: ApplicabilityRules {
                aircraft_models: vec![
                    "A319".to_string(),
                    "A320".to_string(),
                    "A321".to_string(),
                ],
                excluded_if_modifications: vec![
                    ExemptingModification::scoped("Airbus modification 24591", ["A320"]),
                    ExemptingModification::scoped("Airbus modification 24977", ["A321"]),
                    ExemptingModification::universal("SB A320-57-1089"),
                ],
                ..ApplicabilityRules::default()
            },
            raw_applicability_text: Some(
                "Airbus A319, A320 and A321 aeroplanes, all manufacturer serial numbers, except \
                 aeroplanes on which Airbus modification 24591 (A320) or modification 24977 \
                 (A321) has been embodied in production, or on which SB A320-57-1089 has been \
                 accomplished in service."
                    .to_string(),
            ),
        },
    ]
}

fn demo_fleet() -> Vec<AircraftConfiguration> {
    vec![
        AircraftConfiguration::new("MD-11", Some(48123)),
        AircraftConfiguration::new("DC-10-30F", Some(47890)),
        AircraftConfiguration::new("Boeing 737-800", Some(30123)),
        AircraftConfiguration::new("A320-214", Some(5234)),
        AircraftConfiguration::new("A320-232", Some(6789))
            .with_modifications(["mod 24591 (production)"]),
        AircraftConfiguration::new("A320-214", Some(7456))
            .with_modifications(["SB A320-57-1089 Rev 04"]),
        AircraftConfiguration::new("A321-111", Some(8123)),
        AircraftConfiguration::new("A321-112", Some(364))
            .with_modifications(["mod 24977 (production)"]),
        AircraftConfiguration::new("A319-100", Some(9234)),
        AircraftConfiguration::new("MD-10-10F", Some(46234)),
    ]
}

fn verification_fleet() -> Vec<(AircraftConfiguration, BTreeMap<String, bool>)> {
    vec![
        (
            AircraftConfiguration::new("MD-11F", Some(48400)),
            expectations(&[("FAA-2025-23-53", true), ("EASA-2025-0254R1", false)]),
        ),
        (
            AircraftConfiguration::new("A320-214", Some(4500))
                .with_modifications(["mod 24591 (production)"]),
            expectations(&[("FAA-2025-23-53", false), ("EASA-2025-0254R1", false)]),
        ),
        (
            AircraftConfiguration::new("A320-214", Some(4500)),
            expectations(&[("FAA-2025-23-53", false), ("EASA-2025-0254R1", true)]),
        ),
    ]
}

fn expectations(entries: &[(&str, bool)]) -> BTreeMap<String, bool> {
    entries
        .iter()
        .map(|(ad_id, expected)| (ad_id.to_string(), *expected))
        .collect()
}
