// src/gui.rs
use std::sync::mpsc::{Receiver, SyncSender, TrySendError};
use std::time::Duration;
use eframe::egui;
use egui::Color32;
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};
use crate::drivers::{ChartFrame, ChartSink, ScopeError};
/// Sink half living on the acquisition thread: hands frames to the window.
pub struct ChannelChart {
    tx: SyncSender<ChartFrame>,
    ctx: egui::Context,
}
impl ChannelChart {
    /// `tx` should be bounded; frames the window has not picked up yet are dropped.
    pub fn new(tx: SyncSender<ChartFrame>, ctx: egui::Context) -> Self {
        Self { tx, ctx }
    }
}
impl ChartSink for ChannelChart {
    fn render(&mut self, frame: &ChartFrame) -> Result<(), ScopeError> {
        match self.tx.try_send(frame.clone()) {
            // The window is behind; the frame it is about to draw is stale anyway.
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => return Err(ScopeError::DisplayClosed),
        }
        self.ctx.request_repaint();
        Ok(())
    }
}
pub struct ScopeApp {
    rx: Receiver<ChartFrame>,
    latest: Option<ChartFrame>,
    source_label: String,
}
impl ScopeApp {
    pub fn new(rx: Receiver<ChartFrame>, source_label: String) -> Self {
        Self {
            rx,
            latest: None,
            source_label,
        }
    }
}
impl eframe::App for ScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Only the newest frame matters; each one replaces the whole chart.
        while let Ok(frame) = self.rx.try_recv() {
            self.latest = Some(frame);
        }
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.source_label.as_str());
                ui.separator();
                match &self.latest {
                    Some(frame) => {
                        let s = frame.stats;
                        ui.label(format!(
                            "{} samples  min {:.3}  max {:.3}  mean {:.3}",
                            s.count, s.min, s.max, s.mean
                        ));
                    }
                    None => {
                        ui.label(
                            egui::RichText::new("Waiting for first sample...")
                                .color(Color32::YELLOW),
                        );
                    }
                }
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(frame) = &self.latest else {
                ui.centered_and_justified(|ui| ui.label("No data yet."));
                return;
            };
            ui.heading(frame.title);
            Plot::new("rolling_window")
                .x_axis_label(frame.x_label)
                .y_axis_label(frame.y_label)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .show(ui, |plot_ui| {
                    let (x0, x1) = frame.x_bounds;
                    let (y0, y1) = frame.y_bounds;
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max([x0, y0], [x1, y1]));
                    plot_ui.line(
                        Line::new(PlotPoints::new(frame.points.clone()))
                            .color(Color32::from_rgb(0, 255, 255)),
                    );
                });
        });
        // Keep polling even when the acquisition thread is quiet.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use crate::drivers::{Sample, SampleWindow};
    fn frame(value: f64) -> ChartFrame {
        let mut window = SampleWindow::new(10.0).unwrap();
        window.append_and_trim(Sample::new(0.0, value));
        ChartFrame::from_window(&window).unwrap()
    }
    #[test]
    fn full_queue_drops_frames_without_blocking() {
        let (tx, rx) = mpsc::sync_channel(1);
        let mut sink = ChannelChart::new(tx, egui::Context::default());
        sink.render(&frame(1.0)).unwrap();
        sink.render(&frame(2.0)).unwrap();
        sink.render(&frame(3.0)).unwrap();
        assert_eq!(rx.try_recv().unwrap(), frame(1.0));
        assert!(rx.try_recv().is_err());
    }
    #[test]
    fn closed_window_stops_rendering() {
        let (tx, rx) = mpsc::sync_channel(1);
        let mut sink = ChannelChart::new(tx, egui::Context::default());
        drop(rx);
        assert!(matches!(
            sink.render(&frame(1.0)),
            Err(ScopeError::DisplayClosed)
        ));
    }
}
