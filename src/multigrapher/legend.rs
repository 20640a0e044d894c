//! The legend: one entry per polyline, stacked under a titled box.
//!
//! Entries are numbered across the whole session, so graphs drawn on top
//! of each other share one growing legend.

use super::{Graph, legend_tag};
use crate::device::{DrawingDevice, HAlign, VAlign};
use crate::point::{PointStyle, Symbol};
use crate::transform::DevicePoint;

/// Vertical distance between legend entries, as a fraction of the plot box.
const ENTRY_SKIP: f64 = 0.06;

/// Half the length of an entry's sample line.
const SAMPLE_HALF_LENGTH: f64 = 0.1;

impl<D: DrawingDevice> Graph<'_, D> {
    /// Add an entry for a polyline drawn in `style`: its tag, a sample of
    /// its line and its symbol. Uses the device state the polyline set.
    pub(super) fn add_to_legend(&mut self, style: &PointStyle) {
        let Some(pos) = self.layout.legend_pos else {
            return;
        };
        let l = &self.layout;
        let t = &l.transforms;
        let dev = &mut self.mg.device;
        let entry = self.mg.legend_entries;
        let skip = entry as f64 * ENTRY_SKIP;

        dev.set_font_name(&l.title_font.name);
        let font_size = dev.set_font_size(l.size(0.5 * l.title_font.size));
        dev.move_to(DevicePoint::new(
            t.x.box_fraction(pos),
            t.y.box_fraction(0.79 + l.header_clearance()) + 0.65 * font_size - entry as f64 * 150.0
                + l.half_line_width,
        ));
        dev.label(HAlign::Center, VAlign::Bottom, legend_tag(entry));

        dev.line(
            t.box_fraction(pos - SAMPLE_HALF_LENGTH, 0.81 - skip),
            t.box_fraction(pos + SAMPLE_HALF_LENGTH, 0.81 - skip),
        );

        let size = l.size(style.symbol_size);
        let at = t.box_fraction(pos, 0.82 - skip);
        match style.symbol {
            Symbol::Marker(code) => dev.marker(at, code, size),
            Symbol::Glyph(c) => {
                dev.set_font_name(&style.symbol_font);
                dev.marker(at, u32::from(c), size);
            }
            Symbol::Plain | Symbol::None => {}
        }

        self.mg.legend_entries += 1;
    }

    /// Draw the legend box and its heading around the entries made so far.
    ///
    /// Does nothing when the graph has no legend.
    pub fn draw_legend(&mut self) {
        let Some(pos) = self.layout.legend_pos else {
            return;
        };
        let l = &self.layout;
        let t = &l.transforms;
        let dev = &mut self.mg.device;
        let blank = l.blankout_fraction;
        let entries = self.mg.legend_entries as f64;

        dev.set_color("black");
        dev.set_fill_level(0);
        dev.rect(
            t.box_fraction(pos - 0.11 * blank, 0.8 + 0.1 * blank),
            t.box_fraction(pos + 0.11 * blank, 0.865 - 0.064 * entries),
        );

        dev.set_font_name(&l.title_font.name);
        let font_size = dev.set_font_size(l.size(0.5 * l.title_font.size));
        dev.move_to(DevicePoint::new(
            t.x.box_fraction(pos),
            t.y.box_fraction(0.85 + l.header_clearance()) + 0.65 * font_size + l.half_line_width,
        ));
        dev.label(HAlign::Center, VAlign::Bottom, "Legend");
    }
}

#[cfg(test)]
mod tests {
    use crate::bounds::resolve_limits;
    use crate::config::{GraphConfig, LegendPosition, SessionConfig};
    use crate::device::{DrawCommand, HAlign, RecordingDevice, VAlign};
    use crate::multigrapher::Multigrapher;
    use crate::point::{Point, PointStyle, Symbol};

    fn legend_config() -> GraphConfig {
        GraphConfig {
            legend: Some(LegendPosition::Center),
            ..Default::default()
        }
    }

    #[test]
    fn test_entry_per_polyline() {
        let style = PointStyle {
            symbol: Symbol::Marker(3),
            ..Default::default()
        };
        let points: Vec<Point> = (0..6)
            .map(|i| {
                let p = Point::new(f64::from(i), 1.0).with_style(style.clone());
                if i == 3 { p.pen_up() } else { p }
            })
            .collect();
        let config = legend_config();

        let mut mg = Multigrapher::new(RecordingDevice::new(), &SessionConfig::default());
        {
            let mut graph = mg.begin_graph(&config, resolve_limits(&points, &config)).unwrap();
            graph.plot_points(&points);
            graph.draw_legend();
        }
        let commands = mg.into_device().take_commands();
        let headers: Vec<&str> = commands
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
        assert_eq!(headers, ["1", "2", "Legend"]);

        // the second entry sits one skip below the first
        let markers: Vec<f64> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Marker { at, code: 3, .. } if at.x == 2048.0 => Some(at.y),
                _ => None,
            })
            .collect();
        assert_eq!(markers.len(), 2);
        assert!((markers[0] - markers[1] - 0.06 * 0.6 * 4096.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_legend_without_position() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let config = GraphConfig::default();
        let mut mg = Multigrapher::new(RecordingDevice::new(), &SessionConfig::default());
        {
            let mut graph = mg.begin_graph(&config, resolve_limits(&points, &config)).unwrap();
            graph.plot_points(&points);
            graph.draw_legend();
        }
        assert_eq!(mg.device().labels().count(), 0);
    }
}
