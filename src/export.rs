//! Page snapshots and file export (PNG, multi-page PDF).

use crate::draw::{InkOverlay, RenderStyle, render_page};
use crate::notation::NotationRegistry;
use crate::page::{Page, Project};
use crate::placement::SheetLayout;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Renders one page into a fresh ARGB32 surface at `style.scale`.
///
/// The page's ink history is replayed onto its own overlay first, so eraser
/// operations only remove ink and never the content underneath.
pub fn snapshot_page(
    page: &Page,
    registry: &NotationRegistry,
    layout: &SheetLayout,
    style: &RenderStyle,
) -> Result<cairo::ImageSurface> {
    let sheet_width = layout.width.ceil() as i32;
    let sheet_height = layout.height.ceil() as i32;
    let width = (layout.width * style.scale).ceil() as i32;
    let height = (layout.height * style.scale).ceil() as i32;

    let mut ink = InkOverlay::new(sheet_width, sheet_height)
        .context("failed to allocate ink surface")?;
    ink.replay(page.ink());

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
        .with_context(|| format!("failed to allocate {width}x{height} snapshot surface"))?;
    {
        let ctx = cairo::Context::new(&surface).context("failed to create cairo context")?;
        ctx.scale(style.scale, style.scale);
        render_page(&ctx, page, registry, layout, style, Some(ink.surface()));
    }
    surface.flush();
    Ok(surface)
}

/// Writes a snapshot of `page` to `path` as PNG.
pub fn export_png(
    page: &Page,
    registry: &NotationRegistry,
    layout: &SheetLayout,
    style: &RenderStyle,
    path: &Path,
) -> Result<()> {
    let surface = snapshot_page(page, registry, layout, style)?;
    ensure_parent(path)?;

    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    surface
        .write_to_png(&mut writer)
        .with_context(|| format!("failed to write PNG {}", path.display()))?;

    log::info!("Exported PNG to {}", path.display());
    Ok(())
}

/// Writes every page of `project` to a PDF, one sheet per page.
///
/// Each page is rasterised with [`snapshot_page`] and placed as an image, so
/// the PDF matches the PNG output exactly.
pub fn export_pdf(
    project: &Project,
    registry: &NotationRegistry,
    layout: &SheetLayout,
    style: &RenderStyle,
    path: &Path,
) -> Result<()> {
    ensure_parent(path)?;
    let pdf = cairo::PdfSurface::new(layout.width, layout.height, path)
        .with_context(|| format!("failed to create PDF {}", path.display()))?;
    let ctx = cairo::Context::new(&pdf).context("failed to create cairo context")?;

    for (index, page) in project.pages().iter().enumerate() {
        let snapshot = snapshot_page(page, registry, layout, style)
            .with_context(|| format!("failed to render page {}", index + 1))?;

        ctx.save().context("failed to save cairo state")?;
        ctx.scale(1.0 / style.scale, 1.0 / style.scale);
        ctx.set_source_surface(&snapshot, 0.0, 0.0)
            .context("failed to set page image")?;
        ctx.paint().context("failed to paint page image")?;
        ctx.restore().context("failed to restore cairo state")?;
        ctx.show_page()
            .with_context(|| format!("failed to emit PDF page {}", index + 1))?;
    }

    drop(ctx);
    pdf.finish();
    log::info!(
        "Exported {} page(s) to {}",
        project.page_count(),
        path.display()
    );
    Ok(())
}

/// Default export file name: the sanitised title plus a timestamp.
pub fn default_export_name(title: &str, extension: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() { "score".to_string() } else { stem };
    format!(
        "{}_{}.{}",
        stem,
        Local::now().format("%Y-%m-%d_%H%M%S"),
        extension
    )
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            log::info!("Creating export directory: {}", parent.display());
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}
