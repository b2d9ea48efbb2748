use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use max_viz::config::{Command, Config};
use max_viz::{
    colorize_segments, crop_boxes, draw_boxes, draw_pose_lines, records, EncodedImage, FontFile,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let options = config.render_options();

    match &config.command {
        Command::Segment(inputs) => {
            let (image, predictions) = read_inputs(&inputs.image, &inputs.predictions)?;
            let seg_map = records::parse_segmentation(&predictions)?;
            let result = colorize_segments(&image, seg_map.view())?;
            write_png(&inputs.output.with_extension("png"), &result.image)?;
            print_json(&result)
        }
        Command::Pose(inputs) => {
            let (image, predictions) = read_inputs(&inputs.image, &inputs.predictions)?;
            let skeletons = records::parse_pose(&predictions)?;
            let result = draw_pose_lines(&image, &skeletons, &options)?;
            write_png(&inputs.output.with_extension("png"), &result.image)?;
            print_json(&result)
        }
        Command::Boxes { inputs, font } => {
            let (image, predictions) = read_inputs(&inputs.image, &inputs.predictions)?;
            let detections = records::parse_detections(&predictions)?;
            let result = draw_boxes(&image, &detections, &options, &FontFile::new(font.as_str()))?;
            write_png(&inputs.output.with_extension("png"), &result.image)?;
            print_json(&result)
        }
        Command::Crop(inputs) => {
            let (image, predictions) = read_inputs(&inputs.image, &inputs.predictions)?;
            let detections = records::parse_detections(&predictions)?;
            let crops = crop_boxes(&image, &detections, &options)?;
            fs::create_dir_all(&inputs.output).with_context(|| {
                format!("Failed to create directory: {}", inputs.output.display())
            })?;
            for crop in &crops {
                let path = inputs.output.join(format!("crop-{}.png", crop.index));
                write_png(&path, &crop.image)?;
            }
            print_json(&crops)
        }
    }
}

fn read_inputs(image: &Path, predictions: &Path) -> Result<(Vec<u8>, String)> {
    let image = fs::read(image)
        .with_context(|| format!("Failed to read image: {}", image.display()))?;
    let predictions = fs::read_to_string(predictions)
        .with_context(|| format!("Failed to read predictions: {}", predictions.display()))?;
    Ok((image, predictions))
}

fn write_png(path: &Path, image: &EncodedImage) -> Result<()> {
    fs::write(path, &image.data)
        .with_context(|| format!("Failed to save image: {}", path.display()))?;
    log::info!("wrote {}x{} {}", image.width, image.height, path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
