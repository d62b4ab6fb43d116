//! # Fingerprint Shape Translators
//!
//! Turns device-independent shapes into Direct Protocol statements. The
//! transform policy carries `flip_vertical` so the shared geometry pipeline
//! already produces y-up coordinates; `start_y` of a normalized extent is
//! the bottom edge, which is exactly where `PP` anchors.

use crate::assets::AssetCache;
pub use crate::assets::ImageMode;
use crate::container::Container;
use crate::error::EtiquetaError;
use crate::pcx;
use crate::raster;
use crate::shape::{Color, Image, Line, Rectangle, Shape, Text};
use crate::transform::{Matrix, TransformPolicy, Transformer, rotation_sector};

use super::commands::{self, Alignment, CharacterSet, Direction};
use super::{DEFAULT_LABEL_HEIGHT, DEFAULT_LABEL_WIDTH};

/// Name of the scalable font present in every Fingerprint firmware.
const FONT_NAME: &str = "Univers";

/// Stateful Fingerprint translator for one document.
#[derive(Debug)]
pub struct FingerprintTranslator {
    transformer: Transformer,
    image_mode: ImageMode,
    cache: AssetCache,
}

impl Default for FingerprintTranslator {
    fn default() -> Self {
        Self::with_policy(TransformPolicy {
            label_width: DEFAULT_LABEL_WIDTH,
            label_height: DEFAULT_LABEL_HEIGHT,
            mirror_horizontal: false,
            flip_vertical: true,
        })
    }
}

impl FingerprintTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: TransformPolicy) -> Self {
        Self {
            transformer: Transformer::new(policy),
            image_mode: ImageMode::default(),
            cache: AssetCache::new(),
        }
    }

    #[must_use]
    pub fn image_mode(mut self, image_mode: ImageMode) -> Self {
        self.image_mode = image_mode;
        self
    }

    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    /// Translate one shape, appending its statements to the container.
    ///
    /// Unrepresentable shapes (no paint, empty text, missing pixels,
    /// degenerate extents, diagonal lines) contribute nothing and
    /// return `Ok`.
    pub fn translate(
        &mut self,
        shape: &Shape,
        matrix: &Matrix,
        container: &mut Container,
    ) -> Result<(), EtiquetaError> {
        match shape {
            Shape::Rectangle(rectangle) => {
                self.translate_rectangle(rectangle, matrix, container);
                Ok(())
            }
            Shape::Line(line) => {
                self.translate_line(line, matrix, container);
                Ok(())
            }
            Shape::Text(text) => {
                self.translate_text(text, matrix, container);
                Ok(())
            }
            Shape::Image(image) => self.translate_image(image, matrix, container),
        }
    }

    /// Translate a whole document: character set, every shape, print feed.
    pub fn translate_document(
        &mut self,
        shapes: &[Shape],
        matrix: &Matrix,
        copies: u16,
    ) -> Result<Container, EtiquetaError> {
        let mut container = Container::new();
        container.add_header(commands::verb_off());
        container.add_header(commands::input_off());
        container.add_header(commands::immediate_on());
        container.add_header(commands::select_character_set(CharacterSet::Utf8));

        for shape in shapes {
            self.translate(shape, matrix, &mut container)?;
        }

        container.add_body(commands::print_feed(copies));
        Ok(container)
    }

    fn translate_rectangle(&self, rectangle: &Rectangle, matrix: &Matrix, container: &mut Container) {
        // a fill matching the media is not a fill; only the stroke prints
        let fill = rectangle.fill.filter(|fill| !fill.is_background());
        if let Some(fill) = fill {
            let span = Line {
                start_x: rectangle.x,
                start_y: rectangle.y,
                end_x: rectangle.x + rectangle.width,
                end_y: rectangle.y + rectangle.height,
                stroke_width: rectangle.stroke_width,
                stroke: Some(fill),
            };
            let geometry = self.transformer.line(&span, matrix);
            let width = geometry.width().round() as i32;
            let height = geometry.height().round() as i32;
            if width <= 0 || height <= 0 {
                return;
            }
            emit_filled(
                geometry.start_x.round() as i32,
                geometry.start_y.round() as i32,
                width,
                height,
                fill,
                container,
            );
        } else if let Some(stroke) = rectangle.stroke {
            if stroke.is_background() {
                return;
            }
            let geometry = self.transformer.rectangle(rectangle, matrix);
            let width = geometry.width().round() as i32;
            let height = geometry.height().round() as i32;
            let thickness = (geometry.stroke_width.round() as i32).max(1);
            if width <= 0 || height <= 0 {
                return;
            }
            container.add_body(commands::position(
                geometry.start_x.round() as i32,
                geometry.start_y.round() as i32,
            ));
            container.add_body(commands::box_outline(width, height, thickness));
        }
    }

    fn translate_line(&self, line: &Line, matrix: &Matrix, container: &mut Container) {
        let Some(stroke) = line.stroke else {
            return;
        };

        let geometry = self.transformer.line(line, matrix);
        let mut width = geometry.width().round() as i32;
        let mut height = geometry.height().round() as i32;
        let thickness = geometry.stroke_width.round() as i32;

        // PL has no diagonal form
        if width > 0 && height > 0 {
            return;
        }
        if width == 0 {
            width = thickness;
        }
        if height == 0 {
            height = thickness;
        }
        if width <= 0 || height <= 0 {
            return;
        }

        emit_filled(
            geometry.start_x.round() as i32,
            geometry.start_y.round() as i32,
            width,
            height,
            stroke,
            container,
        );
    }

    fn translate_text(&self, text: &Text, matrix: &Matrix, container: &mut Container) {
        let Some(fill) = text.fill else {
            return;
        };
        let content = sanitize(&text.content);
        if content.trim().is_empty() {
            return;
        }

        let geometry = self.transformer.text(text, matrix);
        let (sector, _) = rotation_sector(matrix);
        let inverted = fill.is_background();

        container.add_body(commands::position(
            geometry.x.round() as i32,
            geometry.y.round() as i32,
        ));
        container.add_body(commands::direction(Direction::from_sector_index(
            sector.index(),
        )));
        container.add_body(commands::align(Alignment::BaseLineLeft));
        // polarity is modal, so each text states its own explicitly
        if inverted {
            container.add_body(commands::invert_image());
        } else {
            container.add_body(commands::normal_image());
        }
        container.add_body(commands::font(
            FONT_NAME,
            geometry.font_height.round() as i32,
            0,
        ));
        container.add_body(commands::print_text(&content));
        if inverted {
            container.add_body(commands::normal_image());
        }
    }

    fn translate_image(
        &mut self,
        image: &Image,
        matrix: &Matrix,
        container: &mut Container,
    ) -> Result<(), EtiquetaError> {
        let geometry = self.transformer.image(image, matrix);
        let horizontal_start = geometry.x.round() as i32;
        let vertical_start = geometry.y.round() as i32;

        let identity = image.identity();
        if let Some(name) = self.cache.get(&identity) {
            container.add_body(commands::position(horizontal_start, vertical_start));
            container.add_body(commands::print_image(name));
            return Ok(());
        }

        let Some(pixels) = &image.pixels else {
            return Ok(());
        };
        let width = geometry.align_width.round() as u32;
        let height = geometry.align_height.round() as u32;
        if width == 0 || height == 0 {
            return Ok(());
        }

        let (sector, _) = rotation_sector(matrix);
        let bitmap = raster::align(pixels, width, height, sector);

        match self.image_mode {
            ImageMode::DirectWrite => {
                let mono = raster::encode(&bitmap, false);
                container.add_body(commands::position(horizontal_start, vertical_start));
                container.add_body(commands::print_buffer(mono.data.len()));
                container.add_body(mono.data);
            }
            ImageMode::StoreAndReference => {
                let padded = raster::pad_width_to_octet(&bitmap);
                let mono = raster::encode(&padded, true);
                let payload = pcx::encode_1bpp(&mono)?;

                let name = self.cache.assign(&identity);
                container.add_header(commands::remove_image(&name));
                container.extend_header(commands::image_load(&name, payload));
                container.add_body(commands::position(horizontal_start, vertical_start));
                container.add_body(commands::print_image(&name));
            }
        }
        Ok(())
    }
}

/// Replace characters the quoted `PT` field cannot carry.
fn sanitize(content: &str) -> String {
    content.replace('"', "'")
}

/// Emit a filled extent via `PL`; white paint inverts instead of inking.
fn emit_filled(
    horizontal_start: i32,
    vertical_start: i32,
    width: i32,
    height: i32,
    color: Color,
    container: &mut Container,
) {
    let inverted = color.is_background();
    container.add_body(commands::position(horizontal_start, vertical_start));
    if inverted {
        container.add_body(commands::invert_image());
    }
    container.add_body(commands::line(width, height));
    if inverted {
        container.add_body(commands::normal_image());
    }
}
