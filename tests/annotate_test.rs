use image::{GenericImageView, Rgba, RgbaImage};
use ndarray::Array2;

use max_viz::codec::{decode, scale_to_fit};
use max_viz::mocks::{solid_png, MockFontSource};
use max_viz::segmentation::{MAX_SEGMENTATION_SIZE, OVERLAY_ALPHA};
use max_viz::{
    colorize_segments, crop_boxes, draw_boxes, draw_pose_lines, Detection, FontFile, PoseLine,
    RenderOptions, Result, Skeleton, VizError,
};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const GREEN: Rgba<u8> = Rgba([0, 128, 0, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn decoded(data: &[u8]) -> Result<RgbaImage> {
    Ok(decode(data)?.to_rgba8())
}

#[test]
fn test_segmentation_background_only_is_untouched() -> Result<()> {
    let input = solid_png(4, 2, Rgba([40, 80, 120, 255]))?;
    let seg_map = Array2::<u32>::zeros((256, 512));

    let result = colorize_segments(&input, seg_map.view())?;
    assert!(result.segments.is_empty());
    assert_eq!((result.image.width, result.image.height), (512, 256));

    let expected = scale_to_fit(&decode(&input)?, MAX_SEGMENTATION_SIZE).to_rgba8();
    assert_eq!(decoded(&result.image.data)?, expected);
    Ok(())
}

#[test]
fn test_segmentation_single_class_covers_everything() -> Result<()> {
    let input = solid_png(4, 2, WHITE)?;
    let seg_map = Array2::<u32>::from_elem((256, 512), 15);

    let result = colorize_segments(&input, seg_map.view())?;
    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.segments[0].object, "person");
    assert_eq!(result.segments[0].color, "cyan");

    let output = decoded(&result.image.data)?;
    assert!(output
        .pixels()
        .all(|p| *p == Rgba([0, 255, 255, OVERLAY_ALPHA])));
    Ok(())
}

#[test]
fn test_segmentation_rejects_undecodable_input() {
    let seg_map = Array2::<u32>::zeros((1, 1));
    let err = colorize_segments(b"\x89PNG but not really", seg_map.view()).unwrap_err();
    assert!(matches!(err, VizError::Decode { .. }));
}

#[test]
fn test_pose_skeletons_get_palette_colors() -> Result<()> {
    let input = solid_png(10, 10, WHITE)?;
    let skeletons = vec![
        Skeleton::new(vec![PoseLine::new(10.0, 10.0, 100.0, 10.0)]),
        Skeleton::new(vec![PoseLine::new(10.0, 200.0, 10.0, 300.0)]),
    ];

    let result = draw_pose_lines(&input, &skeletons, &RenderOptions::default())?;
    assert_eq!((result.image.width, result.image.height), (432, 432));

    let output = decoded(&result.image.data)?;
    assert_eq!(*output.get_pixel(50, 10), GREEN);
    assert_eq!(*output.get_pixel(50, 12), GREEN);
    assert_eq!(*output.get_pixel(50, 13), WHITE);
    assert_eq!(*output.get_pixel(10, 250), RED);
    assert_eq!(*output.get_pixel(12, 250), RED);
    assert_eq!(*output.get_pixel(200, 200), WHITE);
    Ok(())
}

#[test]
fn test_pose_line_color_override() -> Result<()> {
    let input = solid_png(10, 10, WHITE)?;
    let skeletons = vec![
        Skeleton::new(vec![PoseLine::new(10.0, 10.0, 100.0, 10.0)]),
        Skeleton::new(vec![PoseLine::new(10.0, 200.0, 10.0, 300.0)]),
    ];
    let options = RenderOptions {
        line_color: Some("blue".to_string()),
        line_pad: Some(1),
        ..Default::default()
    };

    let output = decoded(&draw_pose_lines(&input, &skeletons, &options)?.image.data)?;
    let blue = Rgba([0, 0, 255, 255]);
    assert_eq!(*output.get_pixel(50, 10), blue);
    assert_eq!(*output.get_pixel(50, 11), blue);
    assert_eq!(*output.get_pixel(10, 250), blue);
    assert_eq!(*output.get_pixel(50, 12), WHITE);
    Ok(())
}

#[test]
fn test_boxes_are_stroked_and_labeled() -> Result<()> {
    let input = solid_png(100, 200, WHITE)?;
    let detections = vec![Detection::labeled("dog", [0.1, 0.2, 0.6, 0.8])];

    let result = draw_boxes(&input, &detections, &RenderOptions::default(), &MockFontSource)?;
    assert_eq!(result.objects.len(), 1);
    assert_eq!(result.objects[0].object, "dog");
    assert_eq!(result.objects[0].color, "green");

    let output = decoded(&result.image.data)?;
    assert_eq!(output.dimensions(), (100, 200));
    // box edges
    assert_eq!(*output.get_pixel(80, 100), GREEN);
    assert_eq!(*output.get_pixel(50, 120), GREEN);
    assert_eq!(*output.get_pixel(50, 100), WHITE);
    // no room above the box, so the tag sits at the box top
    assert_eq!(*output.get_pixel(71, 45), GREEN);
    assert_eq!(*output.get_pixel(75, 45), WHITE);
    // text printed inside the tag
    assert_eq!(*output.get_pixel(50, 40), BLACK);
    Ok(())
}

#[test]
fn test_box_tag_goes_above_when_there_is_room() -> Result<()> {
    let input = solid_png(200, 200, WHITE)?;
    let detections = vec![Detection::labeled("a", [100.0, 100.0, 150.0, 150.0])];
    let options = RenderOptions {
        model_type: Some("facial-recognizer".to_string()),
        font_size: Some(max_viz::options::FontSizeOption::Number(16.0)),
        font_color: Some("white".to_string()),
        ..Default::default()
    };

    let result = draw_boxes(&input, &detections, &options, &MockFontSource)?;
    assert_eq!(result.objects[0].object, "a");

    let output = decoded(&result.image.data)?;
    // recognizer labels are empty: a 16px tag of width 2 * pad above the box
    assert_eq!(*output.get_pixel(102, 90), GREEN);
    assert_eq!(*output.get_pixel(120, 90), WHITE);
    assert_eq!(*output.get_pixel(125, 150), GREEN);
    Ok(())
}

#[test]
fn test_boxes_fail_without_font() -> Result<()> {
    let input = solid_png(10, 10, WHITE)?;
    let dir = tempfile::tempdir()?;
    let template = dir.path().join("open-sans-{size}-{color}.ttf");
    let fonts = FontFile::new(template.display().to_string());

    let err = draw_boxes(&input, &[], &RenderOptions::default(), &fonts).unwrap_err();
    assert!(matches!(err, VizError::Font { .. }));
    Ok(())
}

#[test]
fn test_crops_keep_input_order() -> Result<()> {
    let input = solid_png(100, 200, WHITE)?;
    let detections = vec![
        Detection::labeled("dog", [0.1, 0.2, 0.6, 0.8]),
        Detection::labeled("cat", [0.0, 0.0, 0.5, 0.5]),
        Detection::labeled("ghost", [2.0, 2.0, 3.0, 3.0]),
        Detection::labeled("bird", [0.5, 0.5, 1.0, 1.0]),
    ];

    let crops = crop_boxes(&input, &detections, &RenderOptions::default())?;
    let summary: Vec<_> = crops
        .iter()
        .map(|c| (c.index, c.label.as_deref(), c.image.width, c.image.height))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, Some("dog"), 60, 100),
            (1, Some("cat"), 50, 100),
            (3, Some("bird"), 50, 100),
        ]
    );

    for crop in &crops {
        let image = decode(&crop.image.data)?;
        assert_eq!(image.dimensions(), (crop.image.width, crop.image.height));
    }
    Ok(())
}

#[test]
fn test_crop_with_absolute_boxes() -> Result<()> {
    let input = solid_png(20, 20, WHITE)?;
    let detections = vec![Detection::labeled("face", [2.0, 3.0, 7.0, 9.0])];
    let options = RenderOptions {
        model_type: Some("facial-recognizer".to_string()),
        ..Default::default()
    };

    let crops = crop_boxes(&input, &detections, &options)?;
    assert_eq!((crops[0].image.width, crops[0].image.height), (5, 6));
    Ok(())
}

#[test]
fn test_far_away_coordinates_are_ignored() -> Result<()> {
    let input = solid_png(10, 10, WHITE)?;
    let skeletons = vec![Skeleton::new(vec![
        PoseLine::new(-1e30, 5.0, -1e30, 5.0),
        PoseLine::new(-1e30, -1e30, 1e30, 1e30),
        PoseLine::new(0.0, 0.0, 2e8, 0.0),
    ])];
    let pose = draw_pose_lines(&input, &skeletons, &RenderOptions::default())?;
    let output = decoded(&pose.image.data)?;
    assert_eq!(*output.get_pixel(300, 0), GREEN);
    assert_eq!(*output.get_pixel(300, 100), WHITE);

    let options = RenderOptions {
        model_type: Some("facial-recognizer".to_string()),
        ..Default::default()
    };
    let detections = vec![
        Detection::labeled("far", [-1e30, -1e30, 1e30, 4.0]),
        Detection::labeled("gone", [1e30, 1e30, 2e30, 2e30]),
    ];
    let boxes = draw_boxes(&input, &detections, &options, &MockFontSource)?;
    assert_eq!(boxes.objects.len(), 2);
    let output = decoded(&boxes.image.data)?;
    assert_eq!(*output.get_pixel(5, 4), GREEN);

    let crops = crop_boxes(&input, &detections, &options)?;
    assert_eq!(crops.len(), 1);
    assert_eq!((crops[0].image.width, crops[0].image.height), (10, 4));
    Ok(())
}
