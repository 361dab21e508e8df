use std::env;
use std::path::PathBuf;

use syngen_generate::{GenerateOptions, GenerationEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut options = GenerateOptions::default();
    let mut out_dir: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--users" => options.users = args.next().ok_or("missing --users value")?.parse()?,
            "--channels" => {
                options.channels = args.next().ok_or("missing --channels value")?.parse()?
            }
            "--messages" => {
                options.messages = args.next().ok_or("missing --messages value")?.parse()?
            }
            "--seed" => options.seed = Some(args.next().ok_or("missing --seed value")?.parse()?),
            _ => {
                if out_dir.is_none() {
                    out_dir = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let out_dir = out_dir.ok_or("missing output directory")?;
    let result = GenerationEngine::new(options).run(&out_dir)?;

    println!("out_dir={}", result.out_dir.display());
    println!("{}", serde_json::to_string_pretty(&result.report)?);
    Ok(())
}
