use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::{ImageError, ImageFormat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::config::MAX_ICON_SIZE;
use crate::render::{Canvas, RenderedIconSet};

#[derive(Debug, Error)]
pub enum PackError {
    #[error("no icons to write")]
    EmptySet,
    #[error("{size}px frame exceeds the {max}px icon limit", max = MAX_ICON_SIZE)]
    FrameTooLarge { size: u32 },
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

impl PackError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        PackError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What was written, for the caller's confirmation output.
#[derive(Clone, Debug, PartialEq)]
pub struct PackReport {
    pub ico_path: PathBuf,
    pub png_path: PathBuf,
    pub primary_size: u32,
    pub frame_count: usize,
}

/// Write every icon into a multi-frame ICO at `ico_path` (first icon is the
/// primary frame), then the first icon alone as a PNG at `png_path`.
pub fn pack(
    icons: &RenderedIconSet,
    ico_path: &Path,
    png_path: &Path,
) -> Result<PackReport, PackError> {
    let primary = icons.primary().ok_or(PackError::EmptySet)?;
    if let Some(icon) = icons.iter().find(|icon| icon.size > MAX_ICON_SIZE) {
        return Err(PackError::FrameTooLarge { size: icon.size });
    }

    write_ico(icons, ico_path)?;
    write_png(&primary.canvas, png_path)?;

    Ok(PackReport {
        ico_path: ico_path.to_path_buf(),
        png_path: png_path.to_path_buf(),
        primary_size: primary.size,
        frame_count: icons.iter().count(),
    })
}

/// Write each icon as `icon_<size>.png` inside `dir`.
pub fn export_frames(icons: &RenderedIconSet, dir: &Path) -> Result<Vec<PathBuf>, PackError> {
    icons
        .iter()
        .map(|icon| {
            let path = dir.join(format!("icon_{}.png", icon.size));
            write_png(&icon.canvas, &path).map(|_| path)
        })
        .collect()
}

fn write_ico(icons: &RenderedIconSet, path: &Path) -> Result<(), PackError> {
    let mut dir = IconDir::new(ResourceType::Icon);
    for icon in icons.iter() {
        let image = IconImage::from_rgba_data(icon.size, icon.size, icon.canvas.as_raw().clone());
        let entry = IconDirEntry::encode(&image).map_err(|e| PackError::io(path, e))?;
        dir.add_entry(entry);
    }

    let file = File::create(path).map_err(|e| PackError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    dir.write(&mut writer).map_err(|e| PackError::io(path, e))?;
    writer.flush().map_err(|e| PackError::io(path, e))?;

    debug!(path = %path.display(), "wrote icon");
    Ok(())
}

fn write_png(canvas: &Canvas, path: &Path) -> Result<(), PackError> {
    let file = File::create(path).map_err(|e| PackError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    canvas
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(|e| match e {
            ImageError::IoError(source) => PackError::io(path, source),
            source => PackError::Encode {
                path: path.to_path_buf(),
                source,
            },
        })?;
    writer.flush().map_err(|e| PackError::io(path, e))?;

    debug!(path = %path.display(), "wrote png");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IconConfig;
    use crate::render::gauge::RenderedIcon;
    use crate::render::render_set;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gauge-icon-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn default_set() -> RenderedIconSet {
        render_set(&IconConfig::default()).unwrap()
    }

    #[test]
    fn test_pack_writes_ico_and_png() {
        let dir = scratch_dir("pack");
        let ico_path = dir.join("icon.ico");
        let png_path = dir.join("icon.png");
        let icons = default_set();

        let report = pack(&icons, &ico_path, &png_path).unwrap();
        assert_eq!(report.primary_size, 256);
        assert_eq!(report.frame_count, 6);

        let ico = IconDir::read(File::open(&ico_path).unwrap()).unwrap();
        let entries = ico.entries();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].width(), 256);
        let mut sizes: Vec<u32> = entries.iter().map(|e| e.width()).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![16, 32, 48, 64, 128, 256]);
        for entry in entries {
            assert_eq!(entry.width(), entry.height());
        }

        let primary = &icons.primary().unwrap().canvas;
        let decoded = entries[0].decode().unwrap();
        assert_eq!(decoded.rgba_data(), primary.as_raw().as_slice());

        let png = image::open(&png_path).unwrap().to_rgba8();
        assert_eq!(png.dimensions(), (256, 256));
        assert_eq!(&png, primary);

        let via_image = image::open(&ico_path).unwrap();
        assert_eq!((via_image.width(), via_image.height()), (256, 256));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_pack_overwrites_previous_output() {
        let dir = scratch_dir("overwrite");
        let ico_path = dir.join("icon.ico");
        let png_path = dir.join("icon.png");
        fs::write(&png_path, b"stale").unwrap();

        pack(&default_set(), &ico_path, &png_path).unwrap();
        assert!(image::open(&png_path).is_ok());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = scratch_dir("missing").join("nope");
        let result = pack(&default_set(), &dir.join("icon.ico"), &dir.join("icon.png"));
        match result {
            Err(PackError::Io { path, .. }) => assert_eq!(path, dir.join("icon.ico")),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_unwritable_png_keeps_written_ico() {
        let dir = scratch_dir("png-missing");
        let ico_path = dir.join("icon.ico");
        let png_path = dir.join("nope").join("icon.png");

        match pack(&default_set(), &ico_path, &png_path) {
            Err(PackError::Io { path, .. }) => assert_eq!(path, png_path),
            other => panic!("expected io error, got {:?}", other),
        }
        let ico = IconDir::read(File::open(&ico_path).unwrap()).unwrap();
        assert_eq!(ico.entries().len(), 6);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_set_is_rejected() {
        let dir = scratch_dir("empty");
        let ico_path = dir.join("icon.ico");
        let result = pack(&RenderedIconSet::default(), &ico_path, &dir.join("icon.png"));
        assert!(matches!(result, Err(PackError::EmptySet)));
        assert!(!ico_path.exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_oversized_frame_is_rejected() {
        let dir = scratch_dir("oversized");
        let icons: RenderedIconSet = [RenderedIcon {
            size: 512,
            canvas: Canvas::new(512, 512),
        }]
        .into_iter()
        .collect();
        let result = pack(&icons, &dir.join("icon.ico"), &dir.join("icon.png"));
        assert!(matches!(result, Err(PackError::FrameTooLarge { size: 512 })));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_export_frames() {
        let dir = scratch_dir("frames");
        let paths = export_frames(&default_set(), &dir).unwrap();
        assert_eq!(paths.len(), 6);
        let png = image::open(dir.join("icon_48.png")).unwrap();
        assert_eq!((png.width(), png.height()), (48, 48));
        fs::remove_dir_all(&dir).unwrap();
    }
}
