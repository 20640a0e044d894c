//! Drawing graphs on a device.
//!
//! A [`Multigrapher`] owns a [`DrawingDevice`] for a whole session, in which
//! any number of graphs may be drawn on top of each other. Each graph is
//! drawn through a [`Graph`], which holds the graph's coordinate system on
//! the device's state stack for as long as it lives.
//!
//! # Examples
//!
//! ```
//! use grafaksel::{GraphConfig, Multigrapher, Point, RecordingDevice, SessionConfig};
//!
//! let mut mg = Multigrapher::new(RecordingDevice::new(), &SessionConfig::default());
//! let points: Vec<Point> = (0..10).map(|i| Point::new(f64::from(i), f64::from(i * i))).collect();
//! mg.plot_graph(&GraphConfig::default(), &points).unwrap();
//!
//! let device = mg.into_device();
//! assert_eq!(device.depth(), 0);
//! assert!(device.labels().any(|l| l == "80"));
//! ```

mod frame;
mod legend;
mod plot;

use tracing::{debug, trace, warn};

use crate::bounds::{AxisLimits, resolve_limits};
use crate::config::{GraphConfig, GridStyle, SessionConfig};
use crate::device::DrawingDevice;
use crate::error::GraphResult;
use crate::layout::{GraphLayout, PLOT_SIZE};
use crate::per_axis::PerAxis;
use crate::point::Point;
use crate::style::PenColors;
use crate::transform::{DevicePoint, PlotPoint};

pub use frame::FrameTask;

/// Characters that tag successive legend entries.
const LEGEND_TAGS: &str = "12345";

/// A drawing session on one device.
#[derive(Debug)]
pub struct Multigrapher<D: DrawingDevice> {
    device: D,
    bg_color: Option<String>,
    pens: PenColors,
    /// Legend entries made so far, across all graphs.
    legend_entries: usize,
    graphs_begun: usize,
    tick_warning_printed: bool,
}

impl<D: DrawingDevice> Multigrapher<D> {
    /// Start a session: clear the device unless asked to keep its contents,
    /// and set up the square coordinate space graphs are drawn in.
    ///
    /// Bad entries in the pen string are skipped with a warning.
    pub fn new(mut device: D, session: &SessionConfig) -> Self {
        if !session.save_screen || session.bg_color.is_some() {
            device.erase();
        }
        device.set_space(DevicePoint::new(0.0, 0.0), DevicePoint::new(PLOT_SIZE, PLOT_SIZE));

        let mut pens = PenColors::default();
        if let Some(pen_string) = &session.pen_colors {
            pens.apply_pen_string(pen_string);
        }
        debug!(?pens, save_screen = session.save_screen, "multigrapher opened");

        Self {
            device,
            bg_color: session.bg_color.clone(),
            pens,
            legend_entries: 0,
            graphs_begun: 0,
            tick_warning_printed: false,
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// End the session and hand back the device.
    pub fn into_device(self) -> D {
        self.device
    }

    pub fn pens(&self) -> &PenColors {
        &self.pens
    }

    /// Number of graphs begun in this session.
    pub fn graph_count(&self) -> usize {
        self.graphs_begun
    }

    /// Whether the "too few labelled ticks" advice has been given. It is
    /// given at most once per session.
    pub fn tick_warning_printed(&self) -> bool {
        self.tick_warning_printed
    }

    /// Lay out a graph and open its coordinate system on the device.
    ///
    /// The graph is positioned by `config.reposition`; its state is popped
    /// again when the returned [`Graph`] is dropped.
    ///
    /// # Errors
    ///
    /// Any error of [`GraphLayout::new`]. Nothing is drawn in that case.
    pub fn begin_graph(&mut self, config: &GraphConfig, limits: PerAxis<AxisLimits>) -> GraphResult<Graph<'_, D>> {
        let layout = GraphLayout::new(config, limits, self.device.capabilities())?;
        let r = config.reposition;

        self.device.save_state();
        self.device
            .concat([r.scale, 0.0, 0.0, r.scale, r.trans_x * PLOT_SIZE, r.trans_y * PLOT_SIZE]);

        let first = self.graphs_begun == 0;
        self.graphs_begun += 1;
        debug!(graph = self.graphs_begun, ?r, "graph begun");

        Ok(Graph {
            mg: self,
            layout,
            first,
            pen: PenState::default(),
        })
    }

    /// Draw a complete graph of `points`.
    ///
    /// Unset axis limits are taken from the data. The frame goes under the
    /// data, or on top of it with `frame_on_top`; the canvas behind the
    /// frame is painted for every graph but the first of the session.
    ///
    /// # Errors
    ///
    /// Any error of [`GraphLayout::new`].
    pub fn plot_graph(&mut self, config: &GraphConfig, points: &[Point]) -> GraphResult<()> {
        let limits = resolve_limits(points, config);
        let mut graph = self.begin_graph(config, limits)?;
        let draw_canvas = !graph.is_first();

        graph.draw_frame(draw_canvas);
        graph.plot_points(points);
        graph.end_polyline_and_flush();
        if config.frame_on_top {
            graph.draw_frame(false);
        }
        if graph.layout().legend_pos.is_some() {
            graph.draw_legend();
        }
        graph.end();
        Ok(())
    }
}

/// Polyline state carried from one data point to the next.
#[derive(Debug, Clone, Copy)]
struct PenState {
    first_point_of_polyline: bool,
    /// Previous point, in input space.
    old: PlotPoint,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            first_point_of_polyline: true,
            old: PlotPoint::default(),
        }
    }
}

/// One graph being drawn.
///
/// Dropping it restores the device state saved by
/// [`Multigrapher::begin_graph`].
#[derive(Debug)]
pub struct Graph<'a, D: DrawingDevice> {
    mg: &'a mut Multigrapher<D>,
    layout: GraphLayout,
    first: bool,
    pen: PenState,
}

impl<D: DrawingDevice> Graph<'_, D> {
    pub fn layout(&self) -> &GraphLayout {
        &self.layout
    }

    pub fn device(&self) -> &D {
        &self.mg.device
    }

    /// Whether this is the first graph of its session.
    pub fn is_first(&self) -> bool {
        self.first
    }

    /// Finish the current polyline, so that the next point starts a new one.
    pub fn end_polyline_and_flush(&mut self) {
        self.mg.device.end_path();
        self.mg.device.flush();
        self.pen.first_point_of_polyline = true;
    }

    /// Finish the graph.
    pub fn end(self) {}

    /// Give the session's one-time advice when an axis has too few
    /// labelled ticks to be read.
    fn check_labelled_ticks(&mut self) {
        if self.layout.grid_style == GridStyle::NoAxes || self.mg.tick_warning_printed {
            return;
        }
        let sparse = self
            .layout
            .axes
            .each_ref()
            .map(|axis| !axis.omit_ticks && axis.labelled_ticks <= 2);
        if sparse.x || sparse.y {
            warn!(
                x = sparse.x,
                y = sparse.y,
                "too few labelled axis ticks, adjust tick spacing manually"
            );
            self.mg.tick_warning_printed = true;
        }
    }
}

impl<D: DrawingDevice> Drop for Graph<'_, D> {
    fn drop(&mut self) {
        trace!("graph ended");
        self.mg.device.restore_state();
    }
}

/// Tag of the legend entry with the given index, empty once they run out.
fn legend_tag(index: usize) -> &'static str {
    LEGEND_TAGS.get(index..index + 1).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LegendPosition, Reposition};
    use crate::device::{DrawCommand, HAlign, RecordingDevice, VAlign};

    fn session() -> Multigrapher<RecordingDevice> {
        Multigrapher::new(RecordingDevice::new(), &SessionConfig::default())
    }

    fn line(n: i32) -> Vec<Point> {
        (0..n).map(|i| Point::new(f64::from(i), f64::from(i) * 0.5)).collect()
    }

    #[test]
    fn test_new_erases_unless_saving_screen() {
        let mg = session();
        assert_eq!(mg.device().commands()[0], DrawCommand::Erase);

        let keep = SessionConfig {
            save_screen: true,
            ..Default::default()
        };
        let mg = Multigrapher::new(RecordingDevice::new(), &keep);
        assert!(matches!(mg.device().commands()[0], DrawCommand::SetSpace { .. }));

        // a background color forces the erase
        let keep_bg = SessionConfig {
            save_screen: true,
            bg_color: Some("ivory".into()),
            ..Default::default()
        };
        let mg = Multigrapher::new(RecordingDevice::new(), &keep_bg);
        assert_eq!(mg.device().commands()[0], DrawCommand::Erase);
    }

    #[test]
    fn test_session_pen_string() {
        let config = SessionConfig {
            pen_colors: Some("2=black:7=white".into()),
            ..Default::default()
        };
        let mg = Multigrapher::new(RecordingDevice::new(), &config);
        assert_eq!(mg.pens().get(1), "black");
        assert_eq!(mg.pens().get(0), "red");
    }

    #[test]
    fn test_graph_guard_restores_state() {
        let mut mg = session();
        let config = GraphConfig {
            reposition: Reposition {
                scale: 0.5,
                trans_x: 0.25,
                trans_y: 0.5,
            },
            ..Default::default()
        };
        {
            let graph = mg.begin_graph(&config, resolve_limits(&line(3), &config)).unwrap();
            assert_eq!(graph.device().depth(), 1);
            assert!(graph.is_first());
        }
        assert_eq!(mg.device().depth(), 0);
        assert!(mg
            .device()
            .commands()
            .contains(&DrawCommand::Concat([0.5, 0.0, 0.0, 0.5, 1024.0, 2048.0])));

        let graph = mg.begin_graph(&config, resolve_limits(&line(3), &config)).unwrap();
        assert!(!graph.is_first());
    }

    #[test]
    fn test_layout_error_leaves_device_untouched() {
        let mut mg = session();
        let mut config = GraphConfig::default();
        config.x.spacing = Some(0.0);
        let before = mg.device().commands().len();
        assert!(mg.plot_graph(&config, &line(4)).is_err());
        assert_eq!(mg.device().commands().len(), before);
        assert_eq!(mg.graph_count(), 0);
    }

    #[test]
    fn test_canvas_only_after_first_graph() {
        let mut mg = session();
        let config = GraphConfig::default();
        let white = DrawCommand::Color("white".into());

        mg.plot_graph(&config, &line(5)).unwrap();
        assert!(!mg.device().commands().contains(&white));

        mg.device_mut().take_commands();
        mg.plot_graph(&config, &line(5)).unwrap();
        assert!(mg.device().commands().contains(&white));
        assert_eq!(mg.device().depth(), 0);
    }

    #[test]
    fn test_legend_entries_count_across_graphs() {
        let mut mg = session();
        let config = GraphConfig {
            legend: Some(LegendPosition::Right),
            ..Default::default()
        };
        mg.plot_graph(&config, &line(4)).unwrap();
        mg.plot_graph(&config, &line(4)).unwrap();
        let headers: Vec<&str> = mg
            .device()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Label {
                    h: HAlign::Center,
                    v: VAlign::Bottom,
                    text,
                } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(headers, ["1", "Legend", "2", "Legend"]);
    }

    #[test]
    fn test_legend_tags_run_out() {
        assert_eq!(legend_tag(0), "1");
        assert_eq!(legend_tag(4), "5");
        assert_eq!(legend_tag(5), "");
    }

    #[test_log::test]
    fn test_sparse_ticks_advised_once() {
        let mut mg = session();
        let mut config = GraphConfig::default();
        config.x.spacing = Some(10.0);
        config.x.min = Some(0.0);
        config.x.max = Some(10.0);

        mg.plot_graph(&config, &line(4)).unwrap();
        assert!(mg.tick_warning_printed());
        mg.plot_graph(&config, &line(4)).unwrap();
        assert!(mg.tick_warning_printed());
    }

    #[test]
    fn test_no_advice_without_axes() {
        let mut mg = session();
        let config = GraphConfig {
            grid_style: GridStyle::NoAxes,
            ..Default::default()
        };
        mg.plot_graph(&config, &line(4)).unwrap();
        assert!(!mg.tick_warning_printed());
    }
}
