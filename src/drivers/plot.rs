use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::chart::{ChartFrame, ChartSink};
use crate::drivers::error::ScopeError;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub line: RGBColor,
    /// Caption, axis descriptions and tick labels. Needs a system font.
    pub draw_text: bool,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: RGBColor(10, 10, 10),
            line: CYAN,
            draw_text: true,
        }
    }
}
pub fn render_chart_png(frame: &ChartFrame, style: &PlotStyle) -> Result<Vec<u8>, ScopeError> {
    if frame.points.is_empty() {
        return Err(ScopeError::EmptyWindow);
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let (x0, x1) = frame.x_bounds;
        let (y0, y1) = frame.y_bounds;
        let mut builder = ChartBuilder::on(&root);
        builder.margin(10);
        if style.draw_text {
            builder
                .caption(frame.title, ("sans-serif", 20).into_font().color(&WHITE))
                .set_label_area_size(LabelAreaPosition::Left, 55)
                .set_label_area_size(LabelAreaPosition::Bottom, 40);
        }
        let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(&WHITE.mix(0.1))
            .bold_line_style(&WHITE.mix(0.25))
            .axis_style(&WHITE.mix(0.5));
        if style.draw_text {
            mesh.x_desc(frame.x_label)
                .y_desc(frame.y_label)
                .label_style(("sans-serif", 13).into_font().color(&WHITE))
                .axis_desc_style(("sans-serif", 14).into_font().color(&WHITE));
        } else {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw()?;
        let series = frame.points.iter().map(|p| (p[0], p[1]));
        chart.draw_series(LineSeries::new(series, &style.line))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ScopeError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| ScopeError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
/// Headless sink: every redraw replaces the PNG at `path`.
pub struct PngChart {
    path: PathBuf,
    staging: PathBuf,
    style: PlotStyle,
}
impl PngChart {
    pub fn new(path: impl Into<PathBuf>, style: PlotStyle) -> Self {
        let path = path.into();
        let mut staging = path.clone().into_os_string();
        staging.push(".tmp");
        Self {
            path,
            staging: staging.into(),
            style,
        }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
}
impl ChartSink for PngChart {
    fn render(&mut self, frame: &ChartFrame) -> Result<(), ScopeError> {
        let png = render_chart_png(frame, &self.style)?;
        // Viewers polling the file never see a half-written image.
        fs::write(&self.staging, png)?;
        fs::rename(&self.staging, &self.path)?;
        Ok(())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::{Sample, SampleWindow};
    fn frame() -> ChartFrame {
        let mut window = SampleWindow::new(10.0).unwrap();
        for i in 0..40 {
            let t = i as f64 * 0.1;
            window.append_and_trim(Sample::new(t, t.sin()));
        }
        ChartFrame::from_window(&window).unwrap()
    }
    fn textless() -> PlotStyle {
        PlotStyle {
            width: 320,
            height: 160,
            draw_text: false,
            ..PlotStyle::default()
        }
    }
    #[test]
    fn renders_decodable_png() {
        let png = render_chart_png(&frame(), &textless()).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 320);
        assert_eq!(decoded.height(), 160);
    }
    #[test]
    fn png_sink_replaces_file_each_render() {
        let path = std::env::temp_dir().join(format!("serialscope-chart-{}.png", std::process::id()));
        let mut sink = PngChart::new(&path, textless());
        sink.render(&frame()).unwrap();
        let first = fs::metadata(sink.path()).unwrap().len();
        assert!(first > 0);
        sink.render(&frame()).unwrap();
        assert!(image::open(sink.path()).is_ok());
        assert!(!sink.staging.exists());
        fs::remove_file(&path).unwrap();
    }
}
