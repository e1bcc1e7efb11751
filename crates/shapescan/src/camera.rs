//! V4L2 camera capture (feature `camera`).
//!
//! Devices are addressed by index (`/dev/video{index}`) or pinned to an
//! explicit node via [`CameraOptions::device_path`]. Frames are requested
//! in RGB24 where the driver supports it, with a YUYV conversion fallback
//! for the many UVC webcams that only stream packed YUV.

use std::path::PathBuf;

use image::RgbImage;
use shapescan_core::Frame;
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, FourCC};

use crate::error::{CaptureError, SourceError};
use crate::CameraOptions;

const FOURCC_RGB3: [u8; 4] = *b"RGB3";
const FOURCC_YUYV: [u8; 4] = *b"YUYV";

pub(crate) struct CameraCapture {
    device: Device,
    width: u32,
    height: u32,
    fourcc: [u8; 4],
}

impl CameraCapture {
    pub(crate) fn open(index: u32, options: &CameraOptions) -> Result<Self, SourceError> {
        let device = match &options.device_path {
            Some(path) => Device::with_path(path),
            None => Device::new(index as usize),
        }
        .map_err(|source| SourceError::DeviceUnavailable { index, source })?;

        // Prefer RGB24; keep whatever the driver actually gives us.
        let mut format = device
            .format()
            .map_err(|source| SourceError::DeviceUnavailable { index, source })?;
        format.fourcc = FourCC::new(&FOURCC_RGB3);
        let format = device
            .set_format(&format)
            .map_err(|source| SourceError::DeviceUnavailable { index, source })?;

        log::info!(
            "camera {} opened: {}x{} {}",
            describe(index, options),
            format.width,
            format.height,
            String::from_utf8_lossy(&format.fourcc.repr)
        );

        Ok(Self {
            device,
            width: format.width,
            height: format.height,
            fourcc: format.fourcc.repr,
        })
    }

    /// Grab one frame.
    ///
    /// A failed read reports this cycle only; the device handle stays
    /// open and the next call may succeed.
    // TODO: keep the mmap stream alive across reads instead of arming it
    // per frame; needs the buffer arena decoupled from the borrow of
    // `self.device`.
    pub(crate) fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        let mut stream = Stream::with_buffers(&self.device, Type::VideoCapture, 2)
            .map_err(CaptureError::ReadFailure)?;
        let (data, _meta) = stream.next().map_err(CaptureError::ReadFailure)?;

        let image = match self.fourcc {
            FOURCC_RGB3 => rgb24_frame(data, self.width, self.height),
            FOURCC_YUYV => yuyv_to_rgb(data, self.width, self.height),
            other => {
                return Err(CaptureError::UnsupportedFormat {
                    fourcc: String::from_utf8_lossy(&other).into_owned(),
                })
            }
        };

        match image {
            Some(image) => Ok(Frame::from_image(image)),
            None => Err(CaptureError::ReadFailure(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "camera returned a truncated buffer",
            ))),
        }
    }
}

fn describe(index: u32, options: &CameraOptions) -> String {
    match &options.device_path {
        Some(path) => path.display().to_string(),
        None => PathBuf::from(format!("/dev/video{index}")).display().to_string(),
    }
}

fn rgb24_frame(data: &[u8], width: u32, height: u32) -> Option<RgbImage> {
    let expected = (width * height * 3) as usize;
    if data.len() < expected {
        return None;
    }
    RgbImage::from_raw(width, height, data[..expected].to_vec())
}

/// Packed YUYV 4:2:2 to RGB, BT.601 full-range coefficients.
///
/// `None` on a short driver read, mirroring [`rgb24_frame`]. Odd widths
/// still carry a full final four-byte pair; its second luma is unused.
fn yuyv_to_rgb(data: &[u8], width: u32, height: u32) -> Option<RgbImage> {
    let pairs = (width as usize).div_ceil(2);
    let row_bytes = pairs * 4;
    if data.len() < row_bytes * height as usize {
        return None;
    }

    let mut out = RgbImage::new(width, height);
    for y in 0..height as usize {
        let row = &data[y * row_bytes..];
        for pair in 0..pairs {
            let i = pair * 4;
            let (y0, u, y1, v) = (row[i], row[i + 1], row[i + 2], row[i + 3]);
            let x = (pair * 2) as u32;
            out.put_pixel(x, y as u32, image::Rgb(yuv_to_rgb(y0, u, v)));
            if x + 1 < width {
                out.put_pixel(x + 1, y as u32, image::Rgb(yuv_to_rgb(y1, u, v)));
            }
        }
    }
    Some(out)
}

fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let c = f32::from(y) - 16.0;
    let d = f32::from(u) - 128.0;
    let e = f32::from(v) - 128.0;
    let clamp = |x: f32| x.clamp(0.0, 255.0) as u8;
    [
        clamp(1.164 * c + 1.596 * e),
        clamp(1.164 * c - 0.392 * d - 0.813 * e),
        clamp(1.164 * c + 2.017 * d),
    ]
}
