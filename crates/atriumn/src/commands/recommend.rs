//! Recommend-model command.

use anyhow::Result;
use atriumn_client::RecommendModel;
use clap::Args;

use super::{Context, parse_fields};

/// Arguments for the recommend-model command.
#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Application the recommendation is for
    #[arg(long)]
    pub app: String,

    /// Optimization target (lowest_cost, fastest, ...)
    #[arg(long, default_value = "lowest_cost")]
    pub priority: String,

    /// Expected input tokens
    #[arg(long, default_value_t = 1000)]
    pub input_tokens: u64,

    /// Expected output tokens
    #[arg(long, default_value_t = 500)]
    pub output_tokens: u64,

    /// Extra input fields as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

/// Run the recommend-model command.
pub async fn run(args: RecommendArgs, ctx: &Context) -> Result<()> {
    let mut params = RecommendModel::new()
        .priority(args.priority)
        .input_tokens(args.input_tokens)
        .output_tokens(args.output_tokens);
    params.extra = parse_fields(&args.fields)?;

    let result = ctx.client()?.recommend_model(args.app, params).await?;
    ctx.print_result(result)
}
