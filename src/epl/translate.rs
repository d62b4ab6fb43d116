//! # EPL2 Shape Translators
//!
//! Turns device-independent shapes into EPL2 drawing commands. Each shape
//! kind has one translation path; the shared [`Transformer`] supplies
//! device-space geometry, this module only decides which op-codes carry it.
//!
//! ## Image Handling
//!
//! Images ride either inline ([`ImageMode::DirectWrite`], a `GW` per shape)
//! or as stored graphics ([`ImageMode::StoreAndReference`], one `GM` upload
//! in the header and a `GG` reference per shape). Stored graphics are cached
//! by shape identity, so a logo repeated across a document uploads once.

use crate::assets::AssetCache;
pub use crate::assets::ImageMode;
use crate::container::Container;
use crate::error::EtiquetaError;
use crate::font::EPL_GRID;
use crate::pcx;
use crate::raster;
use crate::shape::{Color, Image, Line, Rectangle, Shape, Text};
use crate::transform::{BoxGeometry, Matrix, TransformPolicy, Transformer, rotation_sector};

use super::commands::{self, PrintOrientation, PrinterCodepage};
use super::{DEFAULT_LABEL_HEIGHT, DEFAULT_LABEL_WIDTH};

/// Stateful EPL2 translator for one document.
///
/// Holds the asset cache, so it must live at least as long as the document
/// translation; reusing it across documents is fine as long as the printer
/// keeps its stored graphics.
#[derive(Debug)]
pub struct EplTranslator {
    transformer: Transformer,
    image_mode: ImageMode,
    cache: AssetCache,
}

impl Default for EplTranslator {
    fn default() -> Self {
        Self::with_policy(TransformPolicy {
            label_width: DEFAULT_LABEL_WIDTH,
            label_height: DEFAULT_LABEL_HEIGHT,
            mirror_horizontal: false,
            flip_vertical: false,
        })
    }
}

impl EplTranslator {
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

    /// Translate one shape, appending its commands to the container.
    ///
    /// Unrepresentable shapes (no paint, empty text, missing pixels,
    /// degenerate extents) contribute nothing and return `Ok`.
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
            Shape::Text(text) => self.translate_text(text, matrix, container),
            Shape::Image(image) => self.translate_image(image, matrix, container),
        }
    }

    /// Translate a whole document: setup prologue, every shape, print.
    pub fn translate_document(
        &mut self,
        shapes: &[Shape],
        matrix: &Matrix,
        copies: u16,
    ) -> Result<Container, EtiquetaError> {
        let mut container = Container::new();
        container.add_header(commands::character_set_selection(
            8,
            PrinterCodepage::Windows1252,
            1,
        ));
        container.add_header(commands::set_reference_point(0, 0));
        container.add_header(commands::print_direction(PrintOrientation::Top));

        for shape in shapes {
            self.translate(shape, matrix, &mut container)?;
        }

        container.extend_body(commands::print(copies));
        Ok(container)
    }

    fn translate_rectangle(&self, rectangle: &Rectangle, matrix: &Matrix, container: &mut Container) {
        // a fill matching the media is not a fill; only the stroke prints
        let fill = rectangle.fill.filter(|fill| !fill.is_background());
        if let Some(fill) = fill {
            // a filled rectangle is a thick line spanning its extent
            let span = Line {
                start_x: rectangle.x,
                start_y: rectangle.y,
                end_x: rectangle.x + rectangle.width,
                end_y: rectangle.y + rectangle.height,
                stroke_width: rectangle.stroke_width,
                stroke: Some(fill),
            };
            let geometry = self.transformer.line(&span, matrix);
            emit_extent(&geometry, fill, container);
        } else if let Some(stroke) = rectangle.stroke {
            if stroke.is_background() {
                return;
            }
            let geometry = self.transformer.rectangle(rectangle, matrix);
            let thickness = (geometry.stroke_width.round() as i32).max(1);
            let start_x = geometry.start_x.round() as i32;
            let start_y = geometry.start_y.round() as i32;
            let end_x = geometry.end_x.round() as i32;
            let end_y = geometry.end_y.round() as i32;
            if start_x == end_x && start_y == end_y {
                return;
            }
            container.add_body(commands::draw_box(start_x, start_y, thickness, end_x, end_y));
        }
    }

    fn translate_line(&self, line: &Line, matrix: &Matrix, container: &mut Container) {
        let Some(stroke) = line.stroke else {
            return;
        };

        let geometry = self.transformer.line(line, matrix);
        let width = geometry.width().round() as i32;
        let height = geometry.height().round() as i32;

        if width > 0 && height > 0 {
            // diagonal: LS draws black only, a white diagonal has no op-code
            if stroke.is_background() {
                return;
            }
            // LS is directional, so the endpoint order must survive
            let segment = self.transformer.segment(line, matrix);
            let thickness = (segment.stroke_width.round() as i32).max(1);
            container.add_body(commands::line_draw_diagonal(
                segment.start_x.round() as i32,
                segment.start_y.round() as i32,
                thickness,
                segment.end_x.round() as i32,
                segment.end_y.round() as i32,
            ));
        } else {
            emit_extent(&geometry, stroke, container);
        }
    }

    fn translate_text(
        &self,
        text: &Text,
        matrix: &Matrix,
        container: &mut Container,
    ) -> Result<(), EtiquetaError> {
        let Some(fill) = text.fill else {
            return Ok(());
        };
        let content = sanitize(&text.content);
        if content.trim().is_empty() {
            return Ok(());
        }

        let geometry = self.transformer.text(text, matrix);
        let (sector, _) = rotation_sector(matrix);
        let candidate = EPL_GRID.select(geometry.font_height)?;

        container.add_body(commands::ascii_text(
            geometry.x.round() as i32,
            geometry.y.round() as i32,
            sector.index(),
            candidate.selector,
            candidate.multiplier,
            candidate.multiplier,
            fill.is_background(),
            &content,
        ));
        Ok(())
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
            container.add_body(commands::print_graphics(
                horizontal_start,
                vertical_start,
                name,
            ));
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
                // GW prints where bits are clear
                let mono = raster::encode(&bitmap, true);
                container.extend_body(commands::graphic_direct_write(
                    horizontal_start,
                    vertical_start,
                    mono.bytes_per_row,
                    mono.height,
                    mono.data,
                ));
            }
            ImageMode::StoreAndReference => {
                let padded = raster::pad_width_to_octet(&bitmap);
                let mono = raster::encode(&padded, true);
                let payload = pcx::encode_1bpp(&mono)?;

                let name = self.cache.assign(&identity);
                container.add_header(commands::delete_graphics(&name));
                container.extend_header(commands::store_graphics(&name, payload));
                container.add_body(commands::print_graphics(
                    horizontal_start,
                    vertical_start,
                    &name,
                ));
            }
        }
        Ok(())
    }
}

/// Replace characters the quoted `A` command field cannot carry.
fn sanitize(content: &str) -> String {
    content.replace('"', "'")
}

/// Emit an axis-aligned extent as `LO` (black) or `LW` (white).
///
/// A zero length on one axis falls back to the stroke width, matching how
/// thin lines print; zero on both axes is suppressed.
fn emit_extent(geometry: &BoxGeometry, color: Color, container: &mut Container) {
    let stroke = geometry.stroke_width.round() as i32;
    let mut horizontal_length = geometry.width().round() as i32;
    let mut vertical_length = geometry.height().round() as i32;
    if horizontal_length == 0 {
        horizontal_length = stroke;
    }
    if vertical_length == 0 {
        vertical_length = stroke;
    }
    if horizontal_length <= 0 || vertical_length <= 0 {
        return;
    }

    let horizontal_start = geometry.start_x.round() as i32;
    let vertical_start = geometry.start_y.round() as i32;
    let command = if color.is_background() {
        commands::line_draw_white(
            horizontal_start,
            vertical_start,
            horizontal_length,
            vertical_length,
        )
    } else {
        commands::line_draw_black(
            horizontal_start,
            vertical_start,
            horizontal_length,
            vertical_length,
        )
    };
    container.add_body(command);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Entry;
    use image::RgbaImage;
    use pretty_assertions::assert_eq;

    fn body_text(container: &Container) -> Vec<String> {
        container
            .body()
            .iter()
            .filter_map(|entry| match entry {
                Entry::Text(token) => Some(token.clone()),
                Entry::Binary(_) => None,
            })
            .collect()
    }

    fn translate(shape: Shape) -> Container {
        let mut translator = EplTranslator::new();
        let mut container = Container::new();
        translator
            .translate(&shape, &Matrix::IDENTITY, &mut container)
            .unwrap();
        container
    }

    #[test]
    fn test_filled_rectangle_is_black_box() {
        let container = translate(Shape::Rectangle(Rectangle {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 20.0,
            stroke_width: 0.0,
            fill: Some(Color::BLACK),
            stroke: None,
        }));
        assert_eq!(body_text(&container), vec!["LO0,0,10,20"]);
    }

    #[test]
    fn test_white_fill_falls_back_to_stroke() {
        // white fill matches the media, so only the outline prints
        let container = translate(Shape::Rectangle(Rectangle {
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 30.0,
            stroke_width: 4.0,
            fill: Some(Color::WHITE),
            stroke: Some(Color::BLACK),
        }));
        assert_eq!(body_text(&container), vec!["X8,8,4,32,42"]);
    }

    #[test]
    fn test_white_fill_without_stroke_is_skipped() {
        let container = translate(Shape::Rectangle(Rectangle {
            x: 5.0,
            y: 5.0,
            width: 10.0,
            height: 10.0,
            stroke_width: 0.0,
            fill: Some(Color::WHITE),
            stroke: None,
        }));
        assert!(container.is_empty());
    }

    #[test]
    fn test_stroked_rectangle_is_box_outline() {
        let container = translate(Shape::Rectangle(Rectangle {
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 30.0,
            stroke_width: 4.0,
            fill: None,
            stroke: Some(Color::BLACK),
        }));
        // extent expanded by half the stroke on each side
        assert_eq!(body_text(&container), vec!["X8,8,4,32,42"]);
    }

    #[test]
    fn test_unpainted_rectangle_is_skipped() {
        let container = translate(Shape::Rectangle(Rectangle {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            stroke_width: 1.0,
            fill: None,
            stroke: None,
        }));
        assert!(container.is_empty());
    }

    #[test]
    fn test_horizontal_line_uses_stroke_for_thickness() {
        let container = translate(Shape::Line(Line {
            start_x: 0.0,
            start_y: 50.0,
            end_x: 100.0,
            end_y: 50.0,
            stroke_width: 3.0,
            stroke: Some(Color::BLACK),
        }));
        assert_eq!(body_text(&container), vec!["LO0,50,100,3"]);
    }

    #[test]
    fn test_diagonal_line() {
        let container = translate(Shape::Line(Line {
            start_x: 0.0,
            start_y: 0.0,
            end_x: 50.0,
            end_y: 80.0,
            stroke_width: 2.0,
            stroke: Some(Color::BLACK),
        }));
        assert_eq!(body_text(&container), vec!["LS0,0,2,50,80"]);
    }

    #[test]
    fn test_rising_diagonal_keeps_endpoint_order() {
        // a rising diagonal must not serialize like its falling mirror
        let container = translate(Shape::Line(Line {
            start_x: 0.0,
            start_y: 80.0,
            end_x: 50.0,
            end_y: 0.0,
            stroke_width: 2.0,
            stroke: Some(Color::BLACK),
        }));
        assert_eq!(body_text(&container), vec!["LS0,80,2,50,0"]);
    }

    #[test]
    fn test_degenerate_line_is_skipped() {
        let container = translate(Shape::Line(Line {
            start_x: 10.0,
            start_y: 10.0,
            end_x: 10.0,
            end_y: 10.0,
            stroke_width: 0.0,
            stroke: Some(Color::BLACK),
        }));
        assert!(container.is_empty());
    }

    #[test]
    fn test_text_quotes_are_sanitized() {
        let container = translate(Shape::Text(Text {
            x: 10.0,
            y: 20.0,
            font_height: 24.0,
            content: "say \"hi\"".to_string(),
            fill: Some(Color::BLACK),
        }));
        assert_eq!(body_text(&container), vec!["A10,20,0,4,1,1,N,\"say 'hi'\""]);
    }

    #[test]
    fn test_white_text_prints_reversed() {
        let container = translate(Shape::Text(Text {
            x: 0.0,
            y: 0.0,
            font_height: 24.0,
            content: "OUT".to_string(),
            fill: Some(Color::WHITE),
        }));
        assert_eq!(body_text(&container), vec!["A0,0,0,4,1,1,R,\"OUT\""]);
    }

    #[test]
    fn test_whitespace_text_is_skipped() {
        let container = translate(Shape::Text(Text {
            x: 0.0,
            y: 0.0,
            font_height: 24.0,
            content: "  \t ".to_string(),
            fill: Some(Color::BLACK),
        }));
        assert!(container.is_empty());
    }

    #[test]
    fn test_tiny_text_fails() {
        let mut translator = EplTranslator::new();
        let mut container = Container::new();
        let shape = Shape::Text(Text {
            x: 0.0,
            y: 0.0,
            font_height: 4.0,
            content: "x".to_string(),
            fill: Some(Color::BLACK),
        });
        let result = translator.translate(&shape, &Matrix::IDENTITY, &mut container);
        assert!(matches!(result, Err(EtiquetaError::NoFontCandidate(_))));
    }

    fn black_image(identity: &str) -> Image {
        Image {
            x: 0.0,
            y: 0.0,
            width: 16.0,
            height: 8.0,
            document_id: "doc".to_string(),
            element_id: identity.to_string(),
            pixels: Some(RgbaImage::from_pixel(16, 8, image::Rgba([0, 0, 0, 255]))),
        }
    }

    #[test]
    fn test_direct_write_image_is_inline() {
        let mut translator = EplTranslator::new();
        let mut container = Container::new();
        translator
            .translate(
                &Shape::Image(black_image("logo")),
                &Matrix::IDENTITY,
                &mut container,
            )
            .unwrap();

        assert!(container.header().is_empty());
        assert_eq!(container.body().len(), 2);
        assert_eq!(container.body()[0], Entry::from("GW0,0,2,8"));
        // all ink, inverted: every byte clear
        assert_eq!(container.body()[1], Entry::from(vec![0u8; 16]));
    }

    #[test]
    fn test_stored_image_uploads_once() {
        let mut translator = EplTranslator::new().image_mode(ImageMode::StoreAndReference);
        let mut container = Container::new();
        let shape = Shape::Image(black_image("logo"));
        translator
            .translate(&shape, &Matrix::IDENTITY, &mut container)
            .unwrap();
        translator
            .translate(&shape, &Matrix::IDENTITY, &mut container)
            .unwrap();

        // one GK + one GM command + one binary payload
        assert_eq!(container.header().len(), 3);
        let name = crate::assets::derive_name("doc::logo");
        assert_eq!(
            container.header()[0],
            Entry::from(format!("GK\"{name}\""))
        );
        // both shapes reference the same stored graphic
        let references = body_text(&container);
        assert_eq!(references, vec![
            format!("GG0,0,\"{name}\""),
            format!("GG0,0,\"{name}\""),
        ]);
    }

    #[test]
    fn test_image_without_pixels_is_skipped() {
        let mut image = black_image("missing");
        image.pixels = None;
        let container = translate(Shape::Image(image));
        assert!(container.is_empty());
    }

    #[test]
    fn test_document_prologue_and_epilogue() {
        let mut translator = EplTranslator::new();
        let container = translator
            .translate_document(&[], &Matrix::IDENTITY, 1)
            .unwrap();
        let output = String::from_utf8(container.finish()).unwrap();
        assert_eq!(output, "I8,A,1\nR0,0\nZT\nP1\n\n");
    }
}
