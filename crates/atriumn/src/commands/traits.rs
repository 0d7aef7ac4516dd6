//! Extract-traits command - trait extraction from story text.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use atriumn_client::ExtractTraitsStory;
use clap::Args;

use super::{Context, parse_fields};

/// Arguments for the extract-traits command.
#[derive(Args, Debug)]
pub struct TraitsArgs {
    /// Application the extraction is for
    #[arg(long)]
    pub app: String,

    /// Story text
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub text: Option<String>,

    /// Read the story from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Extra input fields as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

/// Run the extract-traits command.
pub async fn run(args: TraitsArgs, ctx: &Context) -> Result<()> {
    let story = match (args.text, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => anyhow::bail!("either --text or --file is required"),
    };

    let mut params = ExtractTraitsStory::new(story.trim());
    params.extra = parse_fields(&args.fields)?;

    let result = ctx.client()?.extract_traits_story(args.app, params).await?;
    ctx.print_result(result)
}
