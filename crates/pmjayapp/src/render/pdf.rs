use super::{baseline_y, DocumentRenderer, A4_HEIGHT_MM, A4_WIDTH_MM, DEFAULT_BASELINE_OFFSET_MM};
use crate::error::{PmjayError, Result};
use crate::layout::Page;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};
use std::fs::{self, File};
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};

const LAYER_NAME: &str = "Slip";
const TEMPLATE_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// PNG of the blank slip, stretched over the whole page.
    pub template: Option<PathBuf>,
    /// TrueType font file. Builtin Courier when absent.
    pub font: Option<PathBuf>,
    pub font_size: f32,
    pub baseline_offset_mm: f32,
    pub title: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            template: None,
            font: None,
            font_size: 11.0,
            baseline_offset_mm: DEFAULT_BASELINE_OFFSET_MM,
            title: "PMJAY admission slip".to_string(),
        }
    }
}

/// Renders pages to an A4 PDF with `printpdf`.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    settings: RenderSettings,
}

impl PdfRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    fn read_template(&self) -> Result<Option<Vec<u8>>> {
        match &self.settings.template {
            None => Ok(None),
            Some(path) => fs::read(path).map(Some).map_err(|e| {
                PmjayError::Render(format!("cannot read template {}: {}", path.display(), e))
            }),
        }
    }

    fn load_font(&self, doc: &PdfDocumentReference) -> Result<IndirectFontRef> {
        match &self.settings.font {
            None => doc
                .add_builtin_font(BuiltinFont::Courier)
                .map_err(|e| PmjayError::Render(format!("PDF font error: {e}"))),
            Some(path) => {
                let file = File::open(path).map_err(|e| {
                    PmjayError::Render(format!("cannot read font {}: {}", path.display(), e))
                })?;
                doc.add_external_font(file).map_err(|e| {
                    PmjayError::Render(format!("bad font {}: {}", path.display(), e))
                })
            }
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&mut self, pages: &[Page], output: &Path) -> Result<()> {
        if pages.is_empty() {
            return Err(PmjayError::Render("nothing to render".to_string()));
        }

        // Everything that can fail on input is read before the output file is created.
        let template = self.read_template()?;
        let (doc, first_page, first_layer) = PdfDocument::new(
            &self.settings.title,
            Mm(A4_WIDTH_MM),
            Mm(A4_HEIGHT_MM),
            LAYER_NAME,
        );
        let font = self.load_font(&doc)?;

        for (i, page) in pages.iter().enumerate() {
            let (page_index, layer_index) = if i == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), LAYER_NAME)
            };
            let layer = doc.get_page(page_index).get_layer(layer_index);

            if let Some(bytes) = &template {
                stamp_template(bytes, layer.clone())?;
            }

            for field in &page.fields {
                layer.use_text(
                    field.text.as_str(),
                    self.settings.font_size,
                    Mm(field.x),
                    Mm(baseline_y(field.y, self.settings.baseline_offset_mm)),
                    &font,
                );
            }
        }

        let file = File::create(output)?;
        let mut writer = BufWriter::new(file);
        if let Err(e) = doc.save(&mut writer) {
            drop(writer);
            let _ = fs::remove_file(output);
            return Err(PmjayError::Render(format!(
                "PDF save error for {}: {}",
                output.display(),
                e
            )));
        }

        tracing::debug!(output = %output.display(), pages = pages.len(), "document rendered");
        Ok(())
    }
}

/// Draw the template PNG scaled to cover the full page.
fn stamp_template(bytes: &[u8], layer: PdfLayerReference) -> Result<()> {
    let decoder = PngDecoder::new(Cursor::new(bytes))
        .map_err(|e| PmjayError::Render(format!("template is not a PNG: {e}")))?;
    let image = Image::try_from(decoder)
        .map_err(|e| PmjayError::Render(format!("template decode error: {e}")))?;

    let width_px = image.image.width.0 as f32;
    let height_px = image.image.height.0 as f32;
    if width_px == 0.0 || height_px == 0.0 {
        return Err(PmjayError::Render("template image is empty".to_string()));
    }

    let native_width_mm = width_px / TEMPLATE_DPI * MM_PER_INCH;
    let native_height_mm = height_px / TEMPLATE_DPI * MM_PER_INCH;

    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(0.0)),
            scale_x: Some(A4_WIDTH_MM / native_width_mm),
            scale_y: Some(A4_HEIGHT_MM / native_height_mm),
            dpi: Some(TEMPLATE_DPI),
            ..Default::default()
        },
    );
    Ok(())
}
