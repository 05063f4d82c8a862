use chrono::{DateTime, Utc};
use plotters::prelude::*;
use std::io;
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE_NAME: &str = "summary.png";

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 800;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to prepare image directory: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to draw chart: {0}")]
    Draw(String),

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

fn draw_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct GdpBar {
    pub name: String,
    pub gdp_billions: f64,
}

/// Owns the single summary image; every render overwrites it.
#[derive(Debug, Clone)]
pub struct SummaryRenderer {
    path: PathBuf,
}

impl SummaryRenderer {
    pub fn new(cache_dir: impl AsRef<Path>) -> Self {
        Self {
            path: cache_dir.as_ref().join(SUMMARY_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rasterizes on the blocking pool. A panic inside the font stack comes
    /// back as `RenderError::Task`.
    pub async fn render(
        &self,
        total_countries: i64,
        refreshed_at: DateTime<Utc>,
        top: Vec<GdpBar>,
    ) -> Result<(), RenderError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || draw(&path, total_countries, refreshed_at, &top)).await?
    }

    /// Image bytes, or `None` before the first successful render.
    pub async fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn axis_ceiling(peak: f64) -> f64 {
    if peak > 0.0 {
        peak * 1.15
    } else {
        1.0
    }
}

fn category_label(value: &SegmentValue<u32>, names: &[String]) -> String {
    match value {
        SegmentValue::CenterOf(idx) => names.get(*idx as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

fn draw(path: &Path, total_countries: i64, refreshed_at: DateTime<Utc>, top: &[GdpBar]) -> Result<(), RenderError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    let title = format!(
        "Countries Data Summary - {}",
        refreshed_at.format("%Y-%m-%d %H:%M:%S")
    );
    let body = root.titled(&title, ("sans-serif", 26)).map_err(draw_error)?;
    let panels = body.split_evenly((2, 1));

    // Panel 1: total count
    let count = total_countries.max(0) as f64;
    let count_names = vec!["Total Countries".to_string()];
    let mut count_chart = ChartBuilder::on(&panels[0])
        .caption(format!("Total Countries: {}", total_countries), ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..1u32).into_segmented(), 0f64..axis_ceiling(count))
        .map_err(draw_error)?;

    count_chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Count")
        .x_label_formatter(&|v| category_label(v, &count_names))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .draw()
        .map_err(draw_error)?;

    count_chart
        .draw_series(
            Histogram::vertical(&count_chart)
                .style(BLUE.filled())
                .margin(120)
                .data([(0u32, count)]),
        )
        .map_err(draw_error)?;

    // Panel 2: top GDP, in billions
    if !top.is_empty() {
        let names: Vec<String> = top.iter().map(|b| b.name.clone()).collect();
        let peak = top.iter().map(|b| b.gdp_billions).fold(0f64, f64::max);

        let mut gdp_chart = ChartBuilder::on(&panels[1])
            .caption("Top 5 Countries by Estimated GDP", ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(110)
            .y_label_area_size(80)
            .build_cartesian_2d((0u32..top.len() as u32).into_segmented(), 0f64..axis_ceiling(peak))
            .map_err(draw_error)?;

        gdp_chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("GDP (Billions USD)")
            .x_labels(names.len())
            .x_label_formatter(&|v| category_label(v, &names))
            .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
            .draw()
            .map_err(draw_error)?;

        gdp_chart
            .draw_series(
                Histogram::vertical(&gdp_chart)
                    .style(GREEN.filled())
                    .margin(20)
                    .data(top.iter().enumerate().map(|(i, b)| (i as u32, b.gdp_billions))),
            )
            .map_err(draw_error)?;
    }

    root.present().map_err(draw_error)?;
    Ok(())
}
