use anyhow::Result;
use tracing::info_span;

use screen_cli::pipeline::{ValidateConfig, run_validation, write_run_summary};
use screen_cli::types::RunSummary;
use screen_ingest::CsvTableSource;
use screen_model::{NotApplicableMode, ReshapeOptions, RuleContext};
use screen_report::{CompiledReport, compile_all};

use crate::cli::{CompileArgs, ValidateArgs};
use crate::summary::{print_reports, print_rules, print_summary};

pub fn run_rules() {
    print_rules();
}

pub fn run_validate(args: &ValidateArgs) -> Result<RunSummary> {
    let span = info_span!("validate", input_dir = %args.input.display());
    let _guard = span.enter();

    let mut ctx = RuleContext::default();
    if let Some(today) = args.today {
        ctx.today = today;
    }
    if args.normalize_not_applicable {
        ctx = ctx.with_reshape(ReshapeOptions::new().with_not_applicable(NotApplicableMode::ToNull));
    }
    let config = ValidateConfig {
        input_dir: args.input.clone(),
        store_dir: args.dirs.store.clone(),
        output_dir: args.dirs.output.clone(),
        ctx,
        compile: !args.no_compile,
        cleanup: !args.dirs.keep_store,
    };

    let summary = run_validation(&CsvTableSource::new(), &config)?;
    let summary_path = write_run_summary(&summary)?;
    print_summary(&summary, Some(&summary_path));
    Ok(summary)
}

pub fn run_compile(args: &CompileArgs) -> Result<Vec<CompiledReport>> {
    let span = info_span!("compile_reports", store_dir = %args.dirs.store.display());
    let _guard = span.enter();
    let reports = compile_all(&args.dirs.store, &args.dirs.output, !args.dirs.keep_store)?;
    print_reports(&reports);
    Ok(reports)
}
