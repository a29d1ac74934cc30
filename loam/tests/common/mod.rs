// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use loam::app_state::AppState;
use loam::config::{AppConfig, ValidatedConfig};
use loam::runtime_paths::RuntimePaths;
use loam::util::test_fixtures::TestFixtureRoot;
use std::io::Cursor;

pub struct TestHarness {
    pub fixture: TestFixtureRoot,
    pub config: ValidatedConfig,
    pub runtime_paths: RuntimePaths,
    pub app_state: AppState,
}

impl TestHarness {
    /// Harness with a single "about" section holding one text field and
    /// one multi-valued image field.
    pub fn new(prefix: &str) -> Self {
        Self::with_config_yaml(
            prefix,
            concat!(
                "site_name: Test Site\n",
                "sections:\n",
                "  about:\n",
                "    label: About\n",
                "    fields:\n",
                "      title: {}\n",
                "      photos:\n",
                "        type: image\n",
                "        multiple: true\n",
            ),
        )
    }

    pub fn with_config_yaml(prefix: &str, yaml: &str) -> Self {
        let fixture = TestFixtureRoot::new_unique(prefix).expect("fixture root");
        let runtime_paths = fixture.runtime_paths().expect("runtime paths");
        let app_config: AppConfig = serde_yaml::from_str(yaml).expect("config yaml");
        let config = ValidatedConfig::from_app_config(app_config).expect("valid config");
        let app_state = AppState::new(runtime_paths.clone()).expect("app state");
        Self {
            fixture,
            config,
            runtime_paths,
            app_state,
        }
    }
}

/// Smallest well-formed PNG: a single red pixel.
pub fn red_pixel_png() -> Vec<u8> {
    let mut bytes = Vec::new();
    let pixel = image::RgbImage::from_pixel(1, 1, image::Rgb([255, 0, 0]));
    image::DynamicImage::ImageRgb8(pixel)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    bytes
}

/// A 2x2 JPEG with uniform color.
pub fn small_jpeg() -> Vec<u8> {
    let mut bytes = Vec::new();
    let pixels = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 120, 200]));
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
        .expect("encode jpeg");
    bytes
}

/// A 2x1 JPEG carrying an EXIF APP1 segment with the given orientation
/// value (1-8, per the TIFF orientation tag).
pub fn jpeg_with_orientation(orientation: u16) -> Vec<u8> {
    let mut plain = Vec::new();
    let pixels = image::RgbImage::from_fn(2, 1, |x, _| {
        if x == 0 {
            image::Rgb([255, 0, 0])
        } else {
            image::Rgb([0, 0, 255])
        }
    });
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut Cursor::new(&mut plain), image::ImageFormat::Jpeg)
        .expect("encode jpeg");

    // Little-endian TIFF block holding a single IFD entry: tag 0x0112
    // (orientation), type SHORT, count 1, value padded to four bytes.
    let mut tiff: Vec<u8> = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x0112u16.to_le_bytes());
    tiff.extend_from_slice(&3u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&orientation.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_le_bytes());

    let mut app1 = vec![0xFF, 0xE1];
    let length = (2 + 6 + tiff.len()) as u16;
    app1.extend_from_slice(&length.to_be_bytes());
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(&tiff);

    // Splice the APP1 segment in right after the SOI marker.
    let mut bytes = Vec::with_capacity(plain.len() + app1.len());
    bytes.extend_from_slice(&plain[..2]);
    bytes.extend_from_slice(&app1);
    bytes.extend_from_slice(&plain[2..]);
    bytes
}

/// GIF with the requested number of frames.
pub fn gif_with_frames(frame_count: u32) -> Vec<u8> {
    use image::codecs::gif::GifEncoder;
    use image::{Delay, Frame, RgbaImage};

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        for step in 0..frame_count {
            let shade = (step * 80 % 256) as u8;
            let buffer = RgbaImage::from_pixel(2, 2, image::Rgba([shade, shade, shade, 255]));
            let frame = Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(100, 1));
            encoder.encode_frame(frame).expect("encode frame");
        }
    }
    bytes
}
