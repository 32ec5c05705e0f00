use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::config::GeneratorOptions;
use crate::emitter::{GeneratedModule, Generator};
use crate::error::GenerateError;
use crate::model::TypeUniverse;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the JSON type model
    #[arg(long = "model", value_name = "MODEL_PATH")]
    pub model: PathBuf,

    /// Directory receiving the generated modules
    #[arg(long = "out", value_name = "OUT_DIR")]
    pub out: PathBuf,

    /// Optional JSON generator options file
    #[arg(long = "options", value_name = "OPTIONS_PATH")]
    pub options: Option<PathBuf>,

    /// Create the output directory when it does not exist
    #[arg(long = "force-create")]
    pub force_create: bool,
}

pub fn run(args: GenerateArgs) -> i32 {
    match generate(&args) {
        Ok(modules) => {
            println!("generated {} modules", modules.len());
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn generate(args: &GenerateArgs) -> Result<Vec<GeneratedModule>, GenerateError> {
    debug!(
        model = %args.model.display(),
        out = %args.out.display(),
        "Loading type model."
    );
    let model_json = fs::read_to_string(&args.model)?;
    let universe = TypeUniverse::from_json(&model_json)?;

    let options = match &args.options {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            serde_json::from_str(&text).map_err(|source| GenerateError::Parse {
                what: "generator options",
                source,
            })?
        }
        None => GeneratorOptions::default(),
    };

    Generator::new(universe, options).generate_and_save(&args.out, args.force_create)
}
