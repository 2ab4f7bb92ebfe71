// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — lay out a `Report` and render it with `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use cvtoolbox_core::PaperSize;
use cvtoolbox_core::error::ToolboxError;
use image::RgbImage;
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, RawImage,
    RawImageData, RawImageFormat, TextItem, XObjectId, XObjectTransform,
};
use tracing::{debug, info, instrument};

use super::report::Report;

/// Left and top page margin.
const MARGIN_MM: f32 = 10.0;
/// Content never extends below `page height - BOTTOM_MARGIN_MM`.
const BOTTOM_MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const SECTION_GAP_MM: f32 = 10.0;
const IMAGE_WIDTH_MM: f32 = 120.0;
const TITLE_FONT_PT: f32 = 16.0;
const BODY_FONT_PT: f32 = 12.0;
const IMAGE_DPI: f32 = 150.0;
const PT_TO_MM: f32 = 0.3528;

/// Something placed on a page, positioned by its top edge in mm from the
/// top of the page.
#[derive(Debug, Clone, PartialEq)]
enum Placement {
    Text {
        text: String,
        font_size_pt: f32,
        top_mm: f32,
    },
    Image {
        section: usize,
        top_mm: f32,
        width_mm: f32,
        height_mm: f32,
    },
}

/// Renders reports to PDF.
pub struct PdfWriter {
    /// Paper size for page creation.
    paper_size: PaperSize,
    /// Heading on the first page, also stored in the PDF /Info dictionary.
    title: String,
}

impl PdfWriter {
    /// Create a new writer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: "CV Toolbox Report".into(),
        }
    }

    /// Create a new writer defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    // -- Layout ---------------------------------------------------------------

    /// Flow the report top to bottom, starting a new page whenever a section
    /// (label plus image) or a summary line would cross the bottom margin.
    fn layout(&self, report: &Report) -> Vec<Vec<Placement>> {
        let (page_w, page_h) = self.page_dimensions();
        let bottom_mm = page_h.0 - BOTTOM_MARGIN_MM;
        let max_w_mm = IMAGE_WIDTH_MM.min(page_w.0 - 2.0 * MARGIN_MM);
        let max_h_mm = bottom_mm - MARGIN_MM - LINE_HEIGHT_MM;

        let mut pages: Vec<Vec<Placement>> = Vec::new();
        let mut current: Vec<Placement> = Vec::new();
        let mut cursor_mm = MARGIN_MM;

        current.push(Placement::Text {
            text: report.title().to_string(),
            font_size_pt: TITLE_FONT_PT,
            top_mm: cursor_mm,
        });
        cursor_mm += LINE_HEIGHT_MM;

        for (idx, section) in report.sections().iter().enumerate() {
            let (width_mm, height_mm) = fit_image(&section.image, max_w_mm, max_h_mm);
            if cursor_mm + LINE_HEIGHT_MM + height_mm > bottom_mm {
                pages.push(std::mem::take(&mut current));
                cursor_mm = MARGIN_MM;
            }
            current.push(Placement::Text {
                text: section.label.clone(),
                font_size_pt: BODY_FONT_PT,
                top_mm: cursor_mm,
            });
            cursor_mm += LINE_HEIGHT_MM;
            current.push(Placement::Image {
                section: idx,
                top_mm: cursor_mm,
                width_mm,
                height_mm,
            });
            cursor_mm += height_mm + SECTION_GAP_MM;
        }

        for line in report.summary() {
            if cursor_mm + LINE_HEIGHT_MM > bottom_mm {
                pages.push(std::mem::take(&mut current));
                cursor_mm = MARGIN_MM;
            }
            current.push(Placement::Text {
                text: line.clone(),
                font_size_pt: BODY_FONT_PT,
                top_mm: cursor_mm,
            });
            cursor_mm += LINE_HEIGHT_MM;
        }

        pages.push(current);
        pages
    }

    // -- Rendering ------------------------------------------------------------

    /// Render the report to PDF bytes.
    #[instrument(skip_all, fields(sections = report.sections().len()))]
    pub fn render_report(&self, report: &Report) -> Result<Vec<u8>, ToolboxError> {
        let (page_w, page_h) = self.page_dimensions();
        let page_h_pt = page_h.into_pt().0;

        info!(paper = ?self.paper_size, title = report.title(), "Creating report PDF");

        let mut doc = PdfDocument::new(report.title());
        let xobject_ids: Vec<XObjectId> = report
            .sections()
            .iter()
            .map(|section| doc.add_image(&raw_image(&section.image)))
            .collect();

        let pages: Vec<PdfPage> = self
            .layout(report)
            .iter()
            .map(|placements| {
                let ops = placements
                    .iter()
                    .flat_map(|placement| {
                        placement_ops(placement, &xobject_ids, report, page_h_pt)
                    })
                    .collect();
                PdfPage::new(page_w, page_h, ops)
            })
            .collect();
        doc.with_pages(pages);

        debug!(pages = doc.pages.len(), "Report layout complete");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "printpdf emitted warnings");
        }

        Ok(output)
    }

    /// Render the report and write it to `path`, creating the parent
    /// directory if needed.
    pub fn write_report_to_file(
        &self,
        report: &Report,
        path: impl AsRef<Path>,
    ) -> Result<(), ToolboxError> {
        let path = path.as_ref();
        let bytes = self.render_report(report)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &bytes)?;
        info!("Wrote report PDF to {}", path.display());
        Ok(())
    }
}

/// Scale an image to `max_w_mm` wide, shrinking further if it would be
/// taller than `max_h_mm`.
fn fit_image(image: &RgbImage, max_w_mm: f32, max_h_mm: f32) -> (f32, f32) {
    let aspect = image.height().max(1) as f32 / image.width().max(1) as f32;
    let width_mm = max_w_mm;
    let height_mm = width_mm * aspect;
    if height_mm > max_h_mm {
        (max_h_mm / aspect, max_h_mm)
    } else {
        (width_mm, height_mm)
    }
}

fn raw_image(image: &RgbImage) -> RawImage {
    RawImage {
        pixels: RawImageData::U8(image.as_raw().clone()),
        width: image.width() as usize,
        height: image.height() as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    }
}

fn placement_ops(
    placement: &Placement,
    xobject_ids: &[XObjectId],
    report: &Report,
    page_h_pt: f32,
) -> Vec<Op> {
    let margin_pt = Mm(MARGIN_MM).into_pt().0;
    match placement {
        Placement::Text {
            text,
            font_size_pt,
            top_mm,
        } => {
            // Vertically centre the baseline within the line.
            let baseline_mm = top_mm + LINE_HEIGHT_MM * 0.5 + font_size_pt * PT_TO_MM * 0.35;
            vec![
                Op::StartTextSection,
                Op::SetTextCursor {
                    pos: Point {
                        x: Pt(margin_pt),
                        y: Pt(page_h_pt - Mm(baseline_mm).into_pt().0),
                    },
                },
                Op::SetFontSizeBuiltinFont {
                    size: Pt(*font_size_pt),
                    font: BuiltinFont::Helvetica,
                },
                Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(text.clone())],
                    font: BuiltinFont::Helvetica,
                },
                Op::EndTextSection,
            ]
        }
        Placement::Image {
            section,
            top_mm,
            width_mm,
            height_mm,
        } => {
            let image = &report.sections()[*section].image;
            let native_w_pt = image.width().max(1) as f32 / IMAGE_DPI * 72.0;
            let scale = Mm(*width_mm).into_pt().0 / native_w_pt;
            vec![Op::UseXobject {
                id: xobject_ids[*section].clone(),
                transform: XObjectTransform {
                    translate_x: Some(Pt(margin_pt)),
                    translate_y: Some(Pt(page_h_pt - Mm(top_mm + height_mm).into_pt().0)),
                    scale_x: Some(scale),
                    scale_y: Some(scale),
                    dpi: Some(IMAGE_DPI),
                    rotate: None,
                },
            }]
        }
    }
}
