//! Convert a raster image into a single-size Windows ICO file.
//!
//! The source image is decoded, resampled to 256×256 where necessary, and
//! written out as an ICO container holding exactly one frame.
//!
//! ```no_run
//! # use ico_convert::IconConverter;
//! IconConverter::new("icon.png").convert_to_file("app.ico")?;
//! # Ok::<(), ico_convert::Error>(())
//! ```
//!
//! Sources can be PNG, BMP or any other format supported by the [`image`]
//! crate. Formats beyond the defaults need the matching feature enabled:
//! ```toml
//! # ...
//!
//! [dependencies]
//! ico-convert = { version = "...", features = ["jpeg"] }
//! ```

mod error;

pub use error::{Error, Result};

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::codecs::png::PngEncoder;
use image::imageops::{resize, FilterType};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Side length of the single frame embedded in the output file.
pub const ICON_SIZE: u32 = 256;

/// Converts one source image into a single-frame ICO file.
#[derive(Debug)]
pub struct IconConverter {
    source: PathBuf,
}

impl IconConverter {
    pub fn new(source: impl AsRef<Path>) -> IconConverter {
        IconConverter {
            source: source.as_ref().to_owned(),
        }
    }

    /// Runs the conversion and writes the result to `target`.
    ///
    /// The target is replaced atomically: the container is encoded into a
    /// temporary file next to `target` and renamed over it once complete,
    /// so a failed conversion leaves any existing target untouched.
    pub fn convert_to_file(&self, target: impl AsRef<Path>) -> Result<()> {
        let image = self.decode_source()?;
        let frame = render_frame(&image)?;
        write_ico(frame, target.as_ref())
    }

    fn decode_source(&self) -> Result<DynamicImage> {
        let reader = ImageReader::open(&self.source).map_err(|source| Error::Open {
            path: self.source.clone(),
            source,
        })?;
        reader.decode().map_err(|source| Error::Decode {
            path: self.source.clone(),
            source,
        })
    }
}

/// Resamples the decoded image to [`ICON_SIZE`] and encodes it as a
/// PNG-compressed ICO frame. A source already at the right size is only
/// converted to RGBA.
fn render_frame(image: &DynamicImage) -> Result<IcoFrame<'static>> {
    let pixels = if image.width() == ICON_SIZE && image.height() == ICON_SIZE {
        image.to_rgba8()
    } else {
        resize(image, ICON_SIZE, ICON_SIZE, FilterType::Lanczos3)
    };

    let mut encoded = Vec::new();
    PngEncoder::new(Cursor::new(&mut encoded))
        .write_image(
            pixels.as_raw(),
            ICON_SIZE,
            ICON_SIZE,
            ExtendedColorType::Rgba8,
        )
        .map_err(Error::Encode)?;
    IcoFrame::with_encoded(encoded, ICON_SIZE, ICON_SIZE, ExtendedColorType::Rgba8)
        .map_err(Error::Encode)
}

fn write_ico(frame: IcoFrame<'_>, target: &Path) -> Result<()> {
    let write_error = |source| Error::Write {
        path: target.to_owned(),
        source,
    };

    let staging = NamedTempFile::new_in(staging_dir(target)).map_err(write_error)?;
    IcoEncoder::new(staging.as_file())
        .encode_images(&[frame])
        .map_err(Error::Encode)?;
    staging.persist(target).map_err(|e| write_error(e.error))?;
    Ok(())
}

// The temp file must live on the same filesystem as the target for the
// rename to be atomic.
fn staging_dir(target: &Path) -> &Path {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn staging_dir_of_bare_file_name_is_cwd() {
        assert_eq!(staging_dir(Path::new("app.ico")), Path::new("."));
    }

    #[test]
    fn staging_dir_follows_target_directory() {
        assert_eq!(
            staging_dir(Path::new("/tmp/icons/app.ico")),
            Path::new("/tmp/icons")
        );
    }

    #[test]
    fn missing_source_reports_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = IconConverter::new(dir.path().join("absent.png"))
            .convert_to_file(dir.path().join("app.ico"))
            .unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }

    #[test]
    fn non_image_source_reports_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.txt");
        fs::write(&source, "not an image").unwrap();
        let err = IconConverter::new(&source)
            .convert_to_file(dir.path().join("app.ico"))
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
