use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use eventgrid_core::error::Result;
use eventgrid_core::{
    detect_clusters, CalendarEvent, DayLayout, IntervalModel, LayoutEngine, OverflowPolicy,
};
use serde::de::DeserializeOwned;

use super::load_config;

#[derive(Args)]
pub struct InputArgs {
    /// JSON input file (reads stdin when omitted)
    pub file: Option<PathBuf>,
}

impl InputArgs {
    fn read_json<T: DeserializeOwned>(&self) -> Result<T> {
        let content = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        Ok(serde_json::from_str(&content)?)
    }
}

fn engine(
    max_columns: Option<usize>,
    config_path: Option<&Path>,
) -> Result<LayoutEngine> {
    let policy = match max_columns {
        Some(n) => Some(OverflowPolicy::new(n)?),
        None => load_config(config_path)?.overflow_policy(),
    };
    Ok(match policy {
        Some(policy) => LayoutEngine::new().with_overflow(policy),
        None => LayoutEngine::new(),
    })
}

pub fn run_clusters(input: &InputArgs) -> Result<()> {
    let events: Vec<IntervalModel<String>> = input.read_json()?;
    let clusters: Vec<Vec<String>> = detect_clusters(&events)?
        .into_iter()
        .map(|c| c.into_members().into_iter().map(|m| m.reference).collect())
        .collect();
    println!("{}", serde_json::to_string_pretty(&clusters)?);
    Ok(())
}

pub fn run_layout(
    input: &InputArgs,
    max_columns: Option<usize>,
    config_path: Option<&Path>,
) -> Result<()> {
    let events: Vec<IntervalModel<String>> = input.read_json()?;
    let day = engine(max_columns, config_path)?.layout_day(&events)?;
    println!("{}", serde_json::to_string_pretty(&day)?);
    Ok(())
}

pub fn run_bucket(
    input: &InputArgs,
    max_columns: Option<usize>,
    config_path: Option<&Path>,
) -> Result<()> {
    let events: Vec<CalendarEvent> = input.read_json()?;
    let config = load_config(config_path)?;
    let engine = engine(max_columns, config_path)?;

    let mut days: BTreeMap<String, DayLayout<String>> = BTreeMap::new();
    for (date, day_events) in config.bucketer().bucket(&events)? {
        days.insert(date.to_string(), engine.layout_day(&day_events)?);
    }
    println!("{}", serde_json::to_string_pretty(&days)?);
    Ok(())
}
