use std::env;
use std::path::PathBuf;

use syngen_core::timestamp::DayBoundary;
use syngen_eval::{EvaluateOptions, ExportEvaluator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let mut options = EvaluateOptions::default();
    let mut export_dir: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--strict" => options.strict = true,
            "--utc" => options.day_boundary = DayBoundary::Utc,
            "--out" => options.out_dir = args.next().map(PathBuf::from),
            _ => {
                if export_dir.is_none() {
                    export_dir = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let export_dir = export_dir.ok_or("missing export directory")?;
    let result = ExportEvaluator::new(options).run(&export_dir)?;

    println!("{}", result.report);
    if let Some(path) = result.metrics_path {
        println!("metrics_path={}", path.display());
    }
    Ok(())
}
