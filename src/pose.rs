use serde::Serialize;

use crate::codec::{decode, encode_png, scale_to_fit, EncodedImage};
use crate::errors::Result;
use crate::options::RenderOptions;
use crate::raster::DrawLine;
use crate::records::Skeleton;

/// Pose lines are given in the coordinates of the image scaled to fit this box.
pub const MAX_POSE_SIZE: u32 = 432;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoseResult {
    #[serde(flatten)]
    pub image: EncodedImage,
}

/// Scale the image to fit 432x432 and draw each skeleton in its own color.
pub fn draw_pose_lines(
    image_bytes: &[u8],
    skeletons: &[Skeleton],
    options: &RenderOptions,
) -> Result<PoseResult> {
    let mut canvas = scale_to_fit(&decode(image_bytes)?, MAX_POSE_SIZE).to_rgba8();
    let pad = options.line_pad();

    for (i, skeleton) in skeletons.iter().enumerate() {
        let color = options.stroke_color(i).rgba;
        for line in &skeleton.pose_lines {
            canvas.draw_line((line.x_min, line.y_min), (line.x_max, line.y_max), pad, color);
        }
    }
    log::info!(
        "drew {} skeletons on {}x{}",
        skeletons.len(),
        canvas.width(),
        canvas.height()
    );

    Ok(PoseResult {
        image: encode_png(&canvas)?,
    })
}
