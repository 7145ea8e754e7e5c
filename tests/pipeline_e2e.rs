//! End-to-end tests for the mask texture pipeline.
//!
//! Renders small synthetic two-layer SVGs through the full pipeline and
//! checks channel placement, dilation and row order.

use glyph_mask::mask::Mask;
use glyph_mask::{
    secondary_radius, FilterMode, LayerClasses, LayerSelector, MaskError, MaskOptions,
    MaskPipeline, RasterSettings, RasterizationError, Rasterizer, TextureFormat, VectorSource,
    WrapMode,
};

/// 100x50 source: a primary square top-left, a secondary square bottom-right.
const GLYPHS: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50">
  <style>
    .cls-1 { fill: #e0e0e0; }
    .cls-2 { fill: #ff3300; }
  </style>
  <g class="cls-1"><rect x="10" y="5" width="20" height="15"/></g>
  <g class="cls-2"><rect x="60" y="30" width="20" height="10"/></g>
</svg>"##;

fn pipeline() -> MaskPipeline {
    MaskPipeline::new(Rasterizer::without_fonts())
}

fn options(thickness: f32, cell_size: f32) -> MaskOptions {
    MaskOptions::new(VectorSource::new(GLYPHS), thickness, cell_size)
        .with_size(100, 50)
        .with_margin(0.0)
}

fn red(texture: &glyph_mask::TextureDescriptor, x: u32, y: u32) -> u8 {
    texture.texel(x, y).unwrap()[0]
}

fn green(texture: &glyph_mask::TextureDescriptor, x: u32, y: u32) -> u8 {
    texture.texel(x, y).unwrap()[1]
}

// ==================== Layer Rasterization ====================

#[test]
fn test_each_layer_rasterizes_alone() {
    let rasterizer = Rasterizer::without_fonts();
    let source = VectorSource::new(GLYPHS);

    let primary = rasterizer
        .rasterize(&source, LayerSelector::Primary, 100, 50, 0.0)
        .unwrap();
    let secondary = rasterizer
        .rasterize(&source, LayerSelector::Secondary, 100, 50, 0.0)
        .unwrap();

    assert!(primary.is_on(20, 12));
    assert!(!primary.is_on(70, 35));
    assert!(secondary.is_on(70, 35));
    assert!(!secondary.is_on(20, 12));
    // 20x15 and 20x10 squares on pixel boundaries
    assert_eq!(primary.coverage(), 300);
    assert_eq!(secondary.coverage(), 200);
}

#[test]
fn test_custom_class_names() {
    let markup = GLYPHS.replace("cls-1", "ink").replace("cls-2", "knockout");
    let source = VectorSource::with_classes(markup, LayerClasses::new("ink", "knockout"));
    let mask = Rasterizer::without_fonts()
        .rasterize(&source, LayerSelector::Secondary, 100, 50, 0.0)
        .unwrap();
    assert!(mask.is_on(70, 35));
    assert!(!mask.is_on(20, 12));
}

#[test]
fn test_margin_shrinks_and_centers_content() {
    // Full-canvas rect: with a 10% margin the 2:1 source fills exactly the
    // inset rectangle [10, 90) x [5, 45)
    let markup = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50">
  <rect class="cls-1" x="0" y="0" width="100" height="50"/>
  <rect class="cls-2" x="0" y="0" width="1" height="1"/>
</svg>"##;
    let mask = Rasterizer::without_fonts()
        .rasterize(&VectorSource::new(markup), LayerSelector::Primary, 100, 50, 0.1)
        .unwrap();
    assert!(!mask.is_on(5, 25));
    assert!(mask.is_on(10, 25));
    assert!(mask.is_on(89, 25));
    assert!(!mask.is_on(90, 25));
    assert!(!mask.is_on(50, 4));
    assert!(mask.is_on(50, 5));
    assert!(mask.is_on(50, 44));
    assert!(!mask.is_on(50, 45));
}

#[test]
fn test_square_source_centers_horizontally() {
    let markup = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
  <rect class="cls-1" x="0" y="0" width="10" height="10"/>
  <rect class="cls-2" x="0" y="0" width="1" height="1"/>
</svg>"##;
    let mask = Rasterizer::without_fonts()
        .rasterize(&VectorSource::new(markup), LayerSelector::Primary, 100, 50, 0.0)
        .unwrap();
    // Scaled to 50x50 at x = 25
    assert!(!mask.is_on(24, 25));
    assert!(mask.is_on(25, 25));
    assert!(mask.is_on(74, 25));
    assert!(!mask.is_on(75, 25));
    assert_eq!(mask.coverage(), 50 * 50);
}

// ==================== Full Pipeline ====================

#[tokio::test]
async fn test_texture_shape_and_sampling() {
    let texture = pipeline().build(&options(0.0, 4.0)).await.unwrap();
    assert_eq!(texture.width, 100);
    assert_eq!(texture.height, 50);
    assert_eq!(texture.pixels.len(), 100 * 50 * 4);
    assert_eq!(texture.format, TextureFormat::Rgba8);
    assert_eq!(texture.min_filter, FilterMode::Nearest);
    assert_eq!(texture.mag_filter, FilterMode::Nearest);
    assert_eq!(texture.wrap_s, WrapMode::ClampToEdge);
    assert_eq!(texture.wrap_t, WrapMode::ClampToEdge);
    assert!(!texture.generate_mipmaps);
    for px in texture.pixels.chunks_exact(4) {
        assert!(px[0] == 0 || px[0] == 255);
        assert!(px[1] == 0 || px[1] == 255);
        assert_eq!(px[2], 0);
        assert_eq!(px[3], 255);
    }
}

#[tokio::test]
async fn test_channels_hold_their_layers() {
    let texture = pipeline().build(&options(0.0, 4.0)).await.unwrap();
    assert_eq!(red(&texture, 20, 12), 255);
    assert_eq!(green(&texture, 20, 12), 0);
    assert_eq!(red(&texture, 70, 35), 0);
    assert_eq!(green(&texture, 70, 35), 255);
}

#[tokio::test]
async fn test_rows_are_bottom_up() {
    let texture = pipeline().build(&options(0.0, 4.0)).await.unwrap();
    // Top-down pixel (20, 12) lives in memory row 50 - 1 - 12 = 37
    let i = (37 * 100 + 20) * 4;
    assert_eq!(texture.pixels[i], 255);
    // Memory row 12 at x = 20 is image row 37: empty for the primary layer
    let j = (12 * 100 + 20) * 4;
    assert_eq!(texture.pixels[j], 0);
}

#[tokio::test]
async fn test_secondary_is_dilated_primary_is_not() {
    // thickness 1.2, cell 2 -> radius 5 px
    let thin = pipeline().build(&options(0.0, 2.0)).await.unwrap();
    let thick = pipeline().build(&options(1.2, 2.0)).await.unwrap();

    // Primary channel unchanged
    for (a, b) in thin.pixels.chunks_exact(4).zip(thick.pixels.chunks_exact(4)) {
        assert_eq!(a[0], b[0]);
    }

    // Secondary square spans x 60..80, y 30..40; 5 px to the left is on,
    // 6 px is off
    assert_eq!(green(&thin, 55, 35), 0);
    assert_eq!(green(&thick, 55, 35), 255);
    assert_eq!(green(&thick, 54, 35), 0);
    // Corner diagonal (3, 4) away from (60, 30) is exactly radius 5
    assert_eq!(green(&thick, 57, 26), 255);
    assert_eq!(green(&thick, 56, 26), 0);
}

#[tokio::test]
async fn test_dilation_matches_mask_module() {
    let opts = options(0.9, 3.0);
    let texture = pipeline().build(&opts).await.unwrap();
    let secondary: Mask = Rasterizer::without_fonts()
        .rasterize(&opts.source, LayerSelector::Secondary, 100, 50, 0.0)
        .unwrap();
    let expected = glyph_mask::mask::dilate(
        &secondary.data,
        100,
        50,
        secondary_radius(0.9, 3.0),
    );
    for y in 0..50u32 {
        for x in 0..100u32 {
            assert_eq!(green(&texture, x, y), expected[(y * 100 + x) as usize]);
        }
    }
}

#[tokio::test]
async fn test_default_size() {
    let opts = MaskOptions::new(VectorSource::new(GLYPHS), 0.3, 6.0);
    let texture = pipeline().build(&opts).await.unwrap();
    assert_eq!((texture.width, texture.height), (1024, 512));
    assert_eq!(texture.pixels.len(), 1024 * 512 * 4);
}

#[tokio::test]
async fn test_fingerprint_tracks_inputs() {
    let a = pipeline().build(&options(0.3, 4.0)).await.unwrap();
    let b = pipeline().build(&options(0.3, 4.0)).await.unwrap();
    let c = pipeline().build(&options(0.4, 4.0)).await.unwrap();
    assert_eq!(a.fingerprint, b.fingerprint);
    assert_eq!(a.pixels, b.pixels);
    assert_ne!(a.fingerprint, c.fingerprint);
}

#[tokio::test]
async fn test_concurrent_runs_are_independent() {
    let pipeline = pipeline();
    let thin = options(0.0, 2.0);
    let thick = options(1.2, 2.0);
    let (a, b) = tokio::join!(pipeline.build(&thin), pipeline.build(&thick));
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(green(&a, 55, 35), 0);
    assert_eq!(green(&b, 55, 35), 255);
}

#[tokio::test]
async fn test_fingerprint_tracks_font_settings() {
    let with_dirs = MaskPipeline::new(Rasterizer::new(&RasterSettings {
        load_system_fonts: false,
        font_dirs: vec![std::path::PathBuf::from("/nonexistent/fonts")],
        ..RasterSettings::default()
    }));
    let a = pipeline().build(&options(0.3, 4.0)).await.unwrap();
    let b = with_dirs.build(&options(0.3, 4.0)).await.unwrap();
    assert_eq!(a.pixels, b.pixels);
    assert_ne!(a.fingerprint, b.fingerprint);
}

#[tokio::test]
async fn test_huge_cell_size_fills_knockout_channel() {
    // radius 2.5e9 px on a 100x50 texture
    let texture = pipeline().build(&options(1.2, 1.0e9)).await.unwrap();
    for y in 0..50u32 {
        for x in 0..100u32 {
            assert_eq!(green(&texture, x, y), 255, "pixel ({}, {})", x, y);
        }
    }
    // Ink channel is never dilated
    assert_eq!(red(&texture, 20, 12), 255);
    assert_eq!(red(&texture, 70, 35), 0);
}

// ==================== Failure Modes ====================

#[tokio::test]
async fn test_bad_markup_fails_whole_run() {
    let opts = MaskOptions::new(VectorSource::new("<svg"), 0.5, 4.0);
    let result = pipeline().build(&opts).await;
    assert!(matches!(
        result,
        Err(MaskError::Rasterization(RasterizationError::Decode(_)))
    ));
}

#[tokio::test]
async fn test_invalid_cell_size_rejected() {
    let result = pipeline().build(&options(0.5, -1.0)).await;
    assert!(matches!(result, Err(MaskError::InvalidOptions { .. })));
}

#[tokio::test]
async fn test_rasterize_layer_without_dilation() {
    let mask = pipeline()
        .rasterize_layer(&options(1.2, 8.0), LayerSelector::Secondary)
        .await
        .unwrap();
    assert_eq!(mask.coverage(), 200);
}

#[test]
fn test_thickness_mapping_endpoints() {
    assert_eq!(secondary_radius(0.0, 7.0), 0.0);
    assert!((secondary_radius(1.2, 7.0) - 17.5).abs() < 1e-4);
    assert_eq!(secondary_radius(3.0, 7.0), secondary_radius(1.2, 7.0));
}

#[test]
fn test_descriptor_info_serializes() {
    let texture = glyph_mask::TextureDescriptor::new(vec![0, 0, 0, 255], 1, 1, "f00".to_string());
    let json = serde_json::to_value(texture.info()).unwrap();
    assert_eq!(json["format"], "rgba8");
    assert_eq!(json["min_filter"], "nearest");
    assert_eq!(json["wrap_t"], "clamp_to_edge");
    assert_eq!(json["generate_mipmaps"], false);
    assert_eq!(json["flip_y"], false);
    assert_eq!(json["fingerprint"], "f00");
}
