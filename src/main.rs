// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use args::{Args, InputLayout};
use camerakit::{
    convert::extract_planar_bytes,
    image::{ColorFormat, PlanarImage},
    jpeg::{encode_i420, encode_nv21},
    writer::{capture_path, CaptureWriter},
};
use clap::Parser;
use std::{error::Error, fs, time::Instant};
use tracing::{debug, info};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, Layer};

mod args;

fn init_logging(args: &Args) -> Result<(), Box<dyn Error>> {
    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let stdout_log = tracing_subscriber::fmt::layer().with_filter(level);

    let journald = if args.journald {
        match tracing_journald::layer() {
            Ok(layer) => Some(layer.with_filter(level)),
            Err(e) => {
                eprintln!("journald unavailable: {e}");
                None
            }
        }
    } else {
        None
    };

    let tracy = if args.tracy {
        tracy_client::Client::start();
        Some(tracing_tracy::TracyLayer::default().with_filter(level))
    } else {
        None
    };

    let subscriber = tracing_subscriber::registry()
        .with(stdout_log)
        .with(journald)
        .with(tracy);
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let frame = fs::read(&args.input)?;
    let img = match args.input_layout {
        InputLayout::I420 => PlanarImage::from_i420(frame, args.width(), args.height())?,
        InputLayout::Nv21 => PlanarImage::from_nv21(frame, args.width(), args.height())?,
    };
    let img = match args.crop_rect() {
        Some(crop) => img.with_crop(crop),
        None => img,
    };
    info!("loaded {} as {}", args.input.display(), img);

    let now = Instant::now();
    let packed = extract_planar_bytes(&img, args.color_format)?;
    let convert_time = now.elapsed();

    let crop = img.crop();
    let (width, height) = (crop.width as u32, crop.height as u32);
    let (bytes, extension) = if args.raw {
        let extension = match args.color_format {
            ColorFormat::Planar => "i420",
            ColorFormat::SemiPlanar => "nv21",
        };
        (packed, extension)
    } else {
        let now = Instant::now();
        let jpeg = match args.color_format {
            ColorFormat::Planar => encode_i420(&packed, width, height, args.quality)?,
            ColorFormat::SemiPlanar => encode_nv21(&packed, width, height, args.quality)?,
        };
        debug!("jpeg: {}KB encode: {:?}", jpeg.len() / 1024, now.elapsed());
        (jpeg.to_vec(), "jpg")
    };
    debug!(
        "capture {}x{} size: {}KB convert: {:?}",
        width,
        height,
        bytes.len() / 1024,
        convert_time
    );

    let mut writer = CaptureWriter::new(args.workers, args.workers * 2)?;
    let ticket = writer.submit(capture_path(&args.output_dir, extension), bytes)?;
    let path = ticket.wait()?;
    info!("saved {}", path.display());
    writer.shutdown();

    Ok(())
}
