// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use camerakit::image::{ColorFormat, Rect};
use clap::Parser;
use std::path::PathBuf;

/// Layout of the raw frame file given as input.
#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Copy)]
pub enum InputLayout {
    /// Planar 4:2:0: Y, then U, then V
    I420,
    /// Semi-planar 4:2:0: Y, then interleaved V/U
    Nv21,
}

fn parse_color_format(value: &str) -> Result<ColorFormat, String> {
    let code: i32 = value
        .parse()
        .map_err(|_| format!("color format must be a number, got {value}"))?;
    ColorFormat::from_code(code).map_err(|e| e.to_string())
}

/// Command-line arguments for the CameraKit capture tool.
///
/// Converts a raw camera frame into a packed buffer, optionally encodes it to
/// JPEG, and writes the result through the capture writer. Arguments can be
/// specified via command line or environment variables.
///
/// # Example
///
/// ```bash
/// # Via command line
/// camerakit --input frame.nv21 --size "1280 720" --crop "0 0 640 480"
///
/// # Via environment variables
/// export CAMERA_INPUT=frame.nv21
/// export CAMERA_COLOR_FORMAT=2
/// camerakit --raw
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Raw frame file to convert
    #[arg(short, long, env = "CAMERA_INPUT")]
    pub input: PathBuf,

    /// Layout of the raw frame file
    #[arg(long, env = "CAMERA_INPUT_LAYOUT", default_value = "nv21", value_enum)]
    pub input_layout: InputLayout,

    /// Frame resolution in pixels (width height)
    #[arg(
        short,
        long,
        env = "CAMERA_SIZE",
        default_value = "1280 720",
        value_delimiter = ' ',
        num_args = 2
    )]
    pub size: Vec<u32>,

    /// Crop rectangle in pixels (x y width height), defaults to the full frame
    #[arg(long, env = "CAMERA_CROP", value_delimiter = ' ', num_args = 4)]
    pub crop: Vec<i32>,

    /// Output color format: 1 = planar (I420), 2 = semi-planar (NV21)
    #[arg(
        long,
        env = "CAMERA_COLOR_FORMAT",
        default_value = "1",
        value_parser = parse_color_format
    )]
    pub color_format: ColorFormat,

    /// Write the packed frame instead of a JPEG
    #[arg(long, env = "CAMERA_RAW")]
    pub raw: bool,

    /// JPEG quality (1-100)
    #[arg(short, long, env = "CAMERA_QUALITY", default_value = "100")]
    pub quality: i32,

    /// Directory receiving the captures
    #[arg(short, long, env = "CAMERA_OUTPUT_DIR", default_value = "captures")]
    pub output_dir: PathBuf,

    /// Number of capture writer threads
    #[arg(long, env = "CAMERA_WORKERS", default_value = "2")]
    pub workers: usize,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Also send logs to the systemd journal
    #[arg(long, env = "JOURNALD")]
    pub journald: bool,

    /// Enable Tracy profiler for performance analysis
    #[arg(long, env = "TRACY")]
    pub tracy: bool,
}

impl Args {
    pub fn width(&self) -> u32 {
        self.size[0]
    }

    pub fn height(&self) -> u32 {
        self.size[1]
    }

    pub fn crop_rect(&self) -> Option<Rect> {
        match self.crop.as_slice() {
            [x, y, width, height] => Some(Rect::new(*x, *y, *width, *height)),
            _ => None,
        }
    }
}
