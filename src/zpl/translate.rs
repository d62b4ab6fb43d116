//! # ZPL II Shape Translators
//!
//! Turns device-independent shapes into ZPL II fields. Every drawn field
//! is a position command (`^FO`/`^FT`) followed by the field body; stored
//! graphics are downloaded in the container header so they exist before
//! the format block references them.

use crate::assets::AssetCache;
pub use crate::assets::ImageMode;
use crate::container::Container;
use crate::error::EtiquetaError;
use crate::raster;
use crate::shape::{Color, Image, Line, Rectangle, Shape, Text};
use crate::transform::{Matrix, TransformPolicy, Transformer, rotation_sector};

use super::commands::{self, CharacterSet, FieldOrientation, LineColor};
use super::{DEFAULT_LABEL_HEIGHT, DEFAULT_LABEL_WIDTH};

/// Stateful ZPL II translator for one document.
#[derive(Debug)]
pub struct ZplTranslator {
    transformer: Transformer,
    image_mode: ImageMode,
    cache: AssetCache,
}

impl Default for ZplTranslator {
    fn default() -> Self {
        Self::with_policy(TransformPolicy {
            label_width: DEFAULT_LABEL_WIDTH,
            label_height: DEFAULT_LABEL_HEIGHT,
            mirror_horizontal: false,
            flip_vertical: false,
        })
    }
}

impl ZplTranslator {
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

    /// Translate one shape, appending its fields to the container.
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
            Shape::Image(image) => {
                self.translate_image(image, matrix, container);
                Ok(())
            }
        }
    }

    /// Translate a whole document into one `^XA`..`^XZ` format block.
    ///
    /// Graphic downloads land in the container header, before the format
    /// block opens.
    pub fn translate_document(
        &mut self,
        shapes: &[Shape],
        matrix: &Matrix,
        copies: u16,
    ) -> Result<Container, EtiquetaError> {
        let mut container = Container::new();
        container.add_body(commands::start_format());
        container.add_body(commands::label_home(0, 0));
        container.add_body(commands::change_international_font(CharacterSet::Utf8));

        for shape in shapes {
            self.translate(shape, matrix, &mut container)?;
        }

        container.add_body(commands::print_quantity(copies));
        container.add_body(commands::end_format());
        Ok(container)
    }

    fn translate_rectangle(&self, rectangle: &Rectangle, matrix: &Matrix, container: &mut Container) {
        // a fill matching the media is not a fill; only the stroke prints
        let fill = rectangle.fill.filter(|fill| !fill.is_background());
        if let Some(fill) = fill {
            // the fill spans the exact extent, no stroke expansion
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
            container.add_body(commands::field_origin(
                geometry.start_x.round() as i32,
                geometry.start_y.round() as i32,
            ));
            // a border as thick as the smaller dimension fills the box
            container.add_body(commands::graphic_box(
                width,
                height,
                width.min(height),
                line_color(fill),
            ));
        } else if let Some(stroke) = rectangle.stroke {
            let geometry = self.transformer.rectangle(rectangle, matrix);
            let width = geometry.width().round() as i32;
            let height = geometry.height().round() as i32;
            let thickness = (geometry.stroke_width.round() as i32).max(1);
            if width <= 0 || height <= 0 {
                return;
            }
            container.add_body(commands::field_origin(
                geometry.start_x.round() as i32,
                geometry.start_y.round() as i32,
            ));
            container.add_body(commands::graphic_box(
                width,
                height,
                thickness,
                line_color(stroke),
            ));
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

        // ^GB has no diagonal form
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

        container.add_body(commands::field_origin(
            geometry.start_x.round() as i32,
            geometry.start_y.round() as i32,
        ));
        container.add_body(commands::graphic_box(
            width,
            height,
            thickness.max(1),
            line_color(stroke),
        ));
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

        container.add_body(commands::field_typeset(
            geometry.x.round() as i32,
            geometry.y.round() as i32,
        ));
        if fill.is_background() {
            container.add_body(commands::field_reverse());
        }
        container.add_body(commands::font_field(
            FieldOrientation::from_sector_index(sector.index()),
            geometry.font_height.round() as i32,
            &content,
        ));
    }

    fn translate_image(&mut self, image: &Image, matrix: &Matrix, container: &mut Container) {
        let geometry = self.transformer.image(image, matrix);
        let horizontal_start = geometry.x.round() as i32;
        let vertical_start = geometry.y.round() as i32;

        let identity = image.identity();
        if let Some(name) = self.cache.get(&identity) {
            container.add_body(commands::field_origin(horizontal_start, vertical_start));
            container.add_body(commands::recall_graphic(name));
            return;
        }

        let Some(pixels) = &image.pixels else {
            return;
        };
        let width = geometry.align_width.round() as u32;
        let height = geometry.align_height.round() as u32;
        if width == 0 || height == 0 {
            return;
        }

        let (sector, _) = rotation_sector(matrix);
        let bitmap = raster::align(pixels, width, height, sector);
        let mono = raster::encode(&bitmap, false);

        container.add_body(commands::field_origin(horizontal_start, vertical_start));
        match self.image_mode {
            ImageMode::DirectWrite => {
                container.add_body(commands::graphic_field(&mono));
            }
            ImageMode::StoreAndReference => {
                let name = self.cache.assign(&identity);
                container.add_header(commands::download_graphics(&name, &mono));
                container.add_body(commands::recall_graphic(&name));
            }
        }
    }
}

/// Strip the command and tilde prefixes `^FD` cannot carry.
fn sanitize(content: &str) -> String {
    content.replace(['^', '~'], "")
}

fn line_color(color: Color) -> LineColor {
    if color.is_background() {
        LineColor::White
    } else {
        LineColor::Black
    }
}
