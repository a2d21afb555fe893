//! Metadata tag handling: ID3 copy and embedded cover art extraction.
//!
//! The merged mp3 gets its tag set copied wholesale from the first source
//! mp3. Cover extraction looks for an embedded picture (front cover
//! preferred), and the raw bytes are decoded and re-encoded to JPEG when
//! saved so a PNG or WebP cover still yields a valid `cover.jpg`.

use std::path::Path;

use id3::TagLike;

use crate::error::{CoreError, CoreResult};

/// An embedded cover image pulled out of an audio file's tags.
#[derive(Debug, Clone)]
pub struct CoverImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

fn tag_error(path: &Path, err: &id3::Error) -> CoreError {
    CoreError::TagError {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Copies the full ID3 tag set from `source` onto `dest`.
///
/// A source without any tag is a quiet no-op; the merged file simply stays
/// untagged, matching a tagless input.
pub fn copy_tags(source: &Path, dest: &Path) -> CoreResult<()> {
    let tag = match id3::Tag::read_from_path(source) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => {
            log::debug!("No ID3 tag on {}, nothing to copy", source.display());
            return Ok(());
        }
        Err(e) => return Err(tag_error(source, &e)),
    };

    tag.write_to_path(dest, id3::Version::Id3v24)
        .map_err(|e| tag_error(dest, &e))?;
    log::debug!(
        "Copied ID3 tags from {} to {}",
        source.display(),
        dest.display()
    );
    Ok(())
}

/// Looks for an embedded cover image in `path`'s ID3 tag.
///
/// Prefers the front-cover picture; falls back to the first picture of any
/// type. Returns `Ok(None)` when the file has no tag or no pictures.
pub fn find_cover(path: &Path) -> CoreResult<Option<CoverImage>> {
    let tag = match id3::Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => return Ok(None),
        Err(e) => return Err(tag_error(path, &e)),
    };

    let mut chosen: Option<&id3::frame::Picture> = None;
    for picture in tag.pictures() {
        if picture.picture_type == id3::frame::PictureType::CoverFront {
            chosen = Some(picture);
            break;
        }
        if chosen.is_none() {
            chosen = Some(picture);
        }
    }

    Ok(chosen.map(|p| CoverImage {
        data: p.data.clone(),
        mime_type: p.mime_type.clone(),
    }))
}

/// Decodes `cover` and writes it to `dest` as a JPEG.
///
/// Alpha channels are flattened to RGB first; JPEG cannot carry them.
pub fn save_cover(cover: &CoverImage, dest: &Path) -> CoreResult<()> {
    let decoded = image::load_from_memory(&cover.data).map_err(|e| {
        CoreError::CoverImage(format!(
            "cannot decode embedded picture ({}): {e}",
            cover.mime_type
        ))
    })?;

    decoded
        .to_rgb8()
        .save(dest)
        .map_err(|e| CoreError::CoverImage(format!("cannot write {}: {e}", dest.display())))?;

    log::debug!("Saved cover image to {}", dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn jpeg_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200u8, 100, 50]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
            .unwrap();
        bytes
    }

    fn tagged_file(dir: &Path, name: &str, with_picture: bool) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"not really audio").unwrap();

        let mut tag = id3::Tag::new();
        tag.set_title("Test Album");
        tag.set_artist("Test Artist");
        if with_picture {
            let picture = id3::frame::Picture {
                mime_type: "image/jpeg".to_string(),
                picture_type: id3::frame::PictureType::CoverFront,
                description: String::new(),
                data: jpeg_bytes(),
            };
            tag.add_frame(id3::Frame::with_content(
                "APIC",
                id3::Content::Picture(picture),
            ));
        }
        tag.write_to_path(&path, id3::Version::Id3v24).unwrap();
        path
    }

    #[test]
    fn copy_tags_carries_the_full_tag_set() {
        let dir = tempfile::tempdir().unwrap();
        let source = tagged_file(dir.path(), "source.mp3", false);
        let dest = dir.path().join("merged.mp3");
        std::fs::write(&dest, b"merged audio").unwrap();

        copy_tags(&source, &dest).unwrap();

        let tag = id3::Tag::read_from_path(&dest).unwrap();
        assert_eq!(tag.title(), Some("Test Album"));
        assert_eq!(tag.artist(), Some("Test Artist"));
    }

    #[test]
    fn copy_tags_from_untagged_source_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("plain.mp3");
        let dest = dir.path().join("merged.mp3");
        std::fs::write(&source, b"x").unwrap();
        std::fs::write(&dest, b"y").unwrap();

        copy_tags(&source, &dest).unwrap();
        assert!(id3::Tag::read_from_path(&dest).is_err());
    }

    #[test]
    fn find_cover_prefers_front_cover() {
        let dir = tempfile::tempdir().unwrap();
        let path = tagged_file(dir.path(), "with_art.mp3", true);

        let cover = find_cover(&path).unwrap().expect("cover should exist");
        assert_eq!(cover.mime_type, "image/jpeg");
        assert!(!cover.data.is_empty());
    }

    #[test]
    fn find_cover_handles_missing_art() {
        let dir = tempfile::tempdir().unwrap();
        let no_picture = tagged_file(dir.path(), "no_art.mp3", false);
        assert!(find_cover(&no_picture).unwrap().is_none());

        let no_tag = dir.path().join("bare.mp3");
        std::fs::write(&no_tag, b"x").unwrap();
        assert!(find_cover(&no_tag).unwrap().is_none());
    }

    #[test]
    fn save_cover_round_trips_to_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let cover = CoverImage {
            data: jpeg_bytes(),
            mime_type: "image/jpeg".to_string(),
        };
        let dest = dir.path().join("cover.jpg");

        save_cover(&cover, &dest).unwrap();

        let reread = image::open(&dest).unwrap();
        assert_eq!(reread.width(), 4);
        assert_eq!(reread.height(), 4);
    }

    #[test]
    fn save_cover_rejects_garbage_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let cover = CoverImage {
            data: vec![0u8; 16],
            mime_type: "image/jpeg".to_string(),
        };
        let result = save_cover(&cover, &dir.path().join("cover.jpg"));
        assert!(matches!(result, Err(CoreError::CoverImage(_))));
    }
}
