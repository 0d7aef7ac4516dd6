//! Run command - execute an arbitrary task.

use anyhow::Result;
use atriumn_client::TaskRequest;
use clap::Args;

use super::{Context, parse_json};

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Task name (e.g. recommend_model)
    #[arg(long)]
    pub task: String,

    /// Application the task runs for (e.g. axiomiq, idynic)
    #[arg(long)]
    pub app: String,

    /// Task input as a JSON object
    #[arg(long, default_value = "{}")]
    pub input: String,

    /// Task options as a JSON object
    #[arg(long)]
    pub options: Option<String>,

    /// Print the raw HTTP status and body without interpreting them
    #[arg(long)]
    pub raw: bool,
}

/// Run the run command.
pub async fn run(args: RunArgs, ctx: &Context) -> Result<()> {
    let mut request = TaskRequest::from_value(args.task, args.app, parse_json("input", &args.input)?)?;
    if let Some(options) = &args.options {
        request = request.with_options_value(parse_json("options", options)?)?;
    }

    let client = ctx.client()?;

    if args.raw {
        let response = client.execute_raw(&request).await?;
        eprintln!("HTTP {}", response.status());
        println!("{}", response.text().await?);
        return Ok(());
    }

    let result = client.execute(request).await?;
    ctx.print_result(result)
}
