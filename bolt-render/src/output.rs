//! Background loading and image/animation encoding.

use std::{fs::File, io::BufWriter, path::Path};

use anyhow::Context;
use image::{
    Delay, DynamicImage, Frame, ImageFormat, Rgb, RgbImage,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::settings::RenderSettings;

/// Loads the configured background image, or a plain sky of
/// `width` x `height` when none is configured.
pub fn load_background(settings: &RenderSettings) -> anyhow::Result<RgbImage> {
    match &settings.background {
        Some(path) => {
            let image = image::open(path)
                .with_context(|| format!("failed to load background {}", path.display()))?;
            log::info!(
                "loaded background {} ({}x{})",
                path.display(),
                image.width(),
                image.height()
            );
            Ok(image.to_rgb8())
        }
        None => Ok(RgbImage::from_pixel(
            settings.width.max(1),
            settings.height.max(1),
            Rgb(settings.sky_color),
        )),
    }
}

/// Saves a still image. The format follows the file extension, JPEG if unknown.
pub fn save_still(image: &RgbImage, path: &Path) -> anyhow::Result<()> {
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Jpeg);
    image
        .save_with_format(path, format)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("wrote {:?} still to {}", format, path.display());
    Ok(())
}

/// Saves `frames` as a looping GIF with `delay_ms` between frames.
pub fn save_animation(frames: &[RgbImage], delay_ms: u32, path: &Path) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder.set_repeat(Repeat::Infinite)?;

    let delay = Delay::from_numer_denom_ms(delay_ms, 1);
    for image in frames {
        let rgba = DynamicImage::ImageRgb8(image.clone()).to_rgba8();
        encoder
            .encode_frame(Frame::from_parts(rgba, 0, 0, delay))
            .with_context(|| format!("failed to encode frame into {}", path.display()))?;
    }
    log::info!("wrote {} frame animation to {}", frames.len(), path.display());
    Ok(())
}
