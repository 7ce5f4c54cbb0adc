// surface.rs - Drawing and style sinks the field renders into
//
// Mirrors the slice of an immediate-mode 2-D canvas the renderer needs.
// `Recorder` keeps the issued commands in memory for tests and the
// native preview.

pub trait Surface {
    fn clear(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn set_stroke_color(&mut self, color: &str);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
}

/// Receives pixel-valued custom properties (`--x`, `--y`).
pub trait StyleSink {
    fn set_px(&mut self, name: &str, value: f64);
}

/// Discards style updates.
pub struct NoStyle;

impl StyleSink for NoStyle {
    fn set_px(&mut self, _name: &str, _value: f64) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Clear { x: f64, y: f64, w: f64, h: f64 },
    StrokeColor(String),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Stroke,
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<Command>,
    pub styles: Vec<(String, f64)>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.styles.clear();
    }

    /// Split the recorded path into polylines, one per `MoveTo`.
    pub fn polylines(&self) -> Vec<Vec<(f64, f64)>> {
        let mut lines: Vec<Vec<(f64, f64)>> = Vec::new();
        for cmd in &self.commands {
            match *cmd {
                Command::MoveTo(x, y) => lines.push(vec![(x, y)]),
                Command::LineTo(x, y) => match lines.last_mut() {
                    Some(line) => line.push((x, y)),
                    None => lines.push(vec![(x, y)]),
                },
                Command::Clear { .. } => lines.clear(),
                _ => {}
            }
        }
        lines
    }

    /// Most recent value written for a style property.
    pub fn style(&self, name: &str) -> Option<f64> {
        self.styles.iter().rev().find(|(n, _)| n == name).map(|(_, v)| *v)
    }
}

impl Surface for Recorder {
    fn clear(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(Command::Clear { x, y, w, h });
    }
    fn set_stroke_color(&mut self, color: &str) {
        self.commands.push(Command::StrokeColor(color.to_string()));
    }
    fn begin_path(&mut self) {
        self.commands.push(Command::BeginPath);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(Command::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(Command::LineTo(x, y));
    }
    fn stroke(&mut self) {
        self.commands.push(Command::Stroke);
    }
}

impl StyleSink for Recorder {
    fn set_px(&mut self, name: &str, value: f64) {
        self.styles.push((name.to_string(), value));
    }
}
