//! Link command: extracted event JSON in, calendar link out.

use std::io::Read;
use std::path::Path;

use serde::Serialize;
use textcal_core::EventRecord;
use tracing::debug;

use crate::actions;
use crate::cli::LinkArgs;
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// A validated event together with its calendar link.
#[derive(Debug, Clone, Serialize)]
pub struct LinkOutput {
    pub event: EventRecord,
    pub link: String,
}

/// Reads the input, builds the link and prints or acts on it.
pub fn run(args: &LinkArgs, config: &ClientConfig) -> ClientResult<()> {
    let input = read_input(args.input_path().map(|p| p.as_path()))?;
    let output = build(&input, args, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output.link);
    }

    if args.open {
        actions::open_link(&output.link)?;
    }
    if args.copy {
        actions::copy_link(&output.link)?;
    }

    Ok(())
}

/// Validates `input` and encodes the resulting record.
pub fn build(input: &str, args: &LinkArgs, config: &ClientConfig) -> ClientResult<LinkOutput> {
    let raw: serde_json::Value = serde_json::from_str(input)?;

    let validator = config
        .validator()?
        .enforce_time_zones(config.time_zones.enforce || args.enforce_time_zones);
    let event = validator.validate(&raw)?;
    let link = config.encoder()?.encode(&event);

    debug!(title = event.title(), "built calendar link");
    Ok(LinkOutput { event, link })
}

/// Reads the whole input from `path`, or from stdin when `None`.
fn read_input(path: Option<&Path>) -> ClientResult<String> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "reading event from file");
            Ok(std::fs::read_to_string(path)?)
        }
        None => {
            debug!("reading event from stdin");
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}
