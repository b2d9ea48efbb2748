use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::boxes::ModelType;
use crate::options::{FontSizeOption, RenderOptions};

#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub render: RenderArgs,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Color a segmentation map over the image
    Segment(Inputs),
    /// Draw pose skeletons
    Pose(Inputs),
    /// Draw labeled detection boxes
    Boxes {
        #[command(flatten)]
        inputs: Inputs,

        /// Font path; `{size}` and `{color}` are substituted
        #[arg(long)]
        font: String,
    },
    /// Write one PNG per detection box
    Crop(Inputs),
}

#[derive(Args, Clone, Debug)]
pub struct Inputs {
    #[arg(short, long)]
    pub image: PathBuf,

    /// Model output JSON
    #[arg(short, long)]
    pub predictions: PathBuf,

    /// Output PNG, or output directory for `crop`
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,
}

#[derive(Args, Clone, Debug, Default)]
pub struct RenderArgs {
    #[arg(long, global = true)]
    pub line_color: Option<String>,

    #[arg(long, global = true)]
    pub line_pad: Option<u32>,

    #[arg(long, global = true)]
    pub font_color: Option<String>,

    /// 8, 16, 32, 64, 128 or `auto`
    #[arg(long, global = true)]
    pub font_size: Option<String>,

    #[arg(long, global = true, value_parser = check_model_type)]
    pub model_type: Option<String>,
}

impl Config {
    pub fn render_options(&self) -> RenderOptions {
        let render = &self.render;
        RenderOptions {
            line_color: render.line_color.clone(),
            line_pad: render.line_pad,
            font_color: render.font_color.clone(),
            font_size: render.font_size.clone().map(FontSizeOption::Text),
            model_type: render.model_type.clone(),
        }
    }
}

fn check_model_type(s: &str) -> Result<String, String> {
    s.parse::<ModelType>().map_err(|e| {
        format!(
            "{e}. Supported: `object-detector`, `facial-age-estimator`, \
             `facial-emotion-classifier`, `facial-recognizer`"
        )
    })?;
    Ok(s.to_string())
}
